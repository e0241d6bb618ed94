use logmask::{Mask, MaskingEngine, MaskingOptions, Value};

#[derive(Mask)]
enum Event {
    Login { user: String, #[mask(exclude)] password: String },
    Transfer(String, #[mask(prefix = 2)] String),
    Logout,
}

#[derive(Mask)]
enum Level {
    Info,
    Warn,
}

#[derive(Mask)]
#[mask(opaque)]
struct Borrowed<'a> {
    name: &'a str,
}

#[derive(Mask)]
struct Batch<T> {
    events: Vec<T>,
    level: Level,
}

fn main() {
    let engine = MaskingEngine::new(MaskingOptions::default());
    let mut batch = Batch {
        events: vec![
            Event::Login {
                user: "jane".to_string(),
                password: "hunter2".to_string(),
            },
            Event::Transfer("a".to_string(), "TR12345".to_string()),
            Event::Logout,
        ],
        level: Level::Warn,
    };
    engine.mask(&mut batch);

    let mut borrowed = Borrowed { name: "kept" };
    engine.mask(&mut borrowed);
    assert_eq!(borrowed.name, "kept");

    let value = engine.mask_dynamic(Value::object(batch));
    assert!(value.downcast_ref::<Batch<Event>>().is_some());
    let _ = Level::Info;
}
