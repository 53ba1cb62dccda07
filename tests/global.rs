mod common;

use bolton::{Args, Implementation, Registry, Value};
use common::Animal;

bolton::capability! {
    pub Greet(dispatch = GreetDispatch, instance = GreetMethods) {
        fn greet(other: String) -> String;
    }
}

#[test]
fn free_functions_use_the_global_registry() {
    common::init_tracing();
    bolton::implement::<Greet>()
        .for_type::<Animal>()
        .with(Implementation::new("polite").method("greet", |a: &Animal, mut args: Args| {
            let other = args.take::<String>(0)?;
            Ok(Value::new(format!("{} greets {}", a.name, other)))
        }))
        .expect("register");
    let rex = Animal::new("Rex");
    assert_eq!(
        bolton::dispatcher::<Greet>().greet(&rex, "Fido".to_string()).unwrap(),
        "Rex greets Fido"
    );
    assert_eq!(
        Registry::global().on(&rex).greet("Bella".to_string()).unwrap(),
        "Rex greets Bella"
    );
    assert_eq!(Registry::global().implementations::<Greet>().unwrap(), vec!["polite"]);
}
