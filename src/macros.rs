/// Declares a capability: a marker type implementing [`Capability`](crate::Capability),
/// a forwarding trait for [`Dispatcher`](crate::Dispatcher) and a method trait
/// for [`Instance`](crate::Instance), each with one typed method per declared
/// method.
///
/// ```
/// bolton::capability! {
///     /// Repeats what it is given.
///     pub Speak(dispatch = SpeakDispatch, instance = SpeakMethods) {
///         fn echo(value: String) -> String;
///     }
/// }
/// ```
///
/// The dispatcher forwarders take the receiver first, `dispatcher.echo(&rex, value)`,
/// while the instance methods go through the receiver type's capability
/// table, `registry.on(&rex).echo(value)`, so a method the type defines
/// itself wins over the injected one.
#[macro_export]
macro_rules! capability {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident ( dispatch = $dispatch:ident , instance = $instance:ident $(,)? ) {
            $(
                $(#[$method_meta:meta])*
                fn $method:ident ( $( $arg:ident : $ty:ty ),* $(,)? ) -> $ret:ty ;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Capability for $name {
            const NAME: &'static str = stringify!($name);
            const METHODS: &'static [&'static str] = &[ $( stringify!($method) ),* ];
        }

        $vis trait $dispatch {
            $(
                $(#[$method_meta])*
                fn $method(&self, receiver: &dyn ::std::any::Any, $( $arg : $ty ),* ) -> $crate::Result<$ret>;
            )*
        }

        impl $dispatch for $crate::Dispatcher<$name> {
            $(
                fn $method(&self, receiver: &dyn ::std::any::Any, $( $arg : $ty ),* ) -> $crate::Result<$ret> {
                    let args = $crate::Args::new() $( .with($arg) )*;
                    $crate::Dispatcher::<$name>::call(self, receiver, stringify!($method), args)?
                        .downcast::<$ret>()
                }
            )*
        }

        $vis trait $instance {
            $(
                $(#[$method_meta])*
                fn $method(&self, $( $arg : $ty ),* ) -> $crate::Result<$ret>;
            )*
        }

        impl $instance for $crate::Instance<'_> {
            $(
                fn $method(&self, $( $arg : $ty ),* ) -> $crate::Result<$ret> {
                    let args = $crate::Args::new() $( .with($arg) )*;
                    $crate::Instance::invoke(self, stringify!($method), args)?
                        .downcast::<$ret>()
                }
            )*
        }
    };
}
