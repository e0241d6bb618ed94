//! End-to-end tests for masking typed values.
//!
//! These tests exercise the integration of:
//! - `Mask` derive member tables,
//! - rule resolution by name, style variant and canonical substring, and
//! - the in-place versus copying contracts of the entry points.

#![allow(non_snake_case)]

use std::{collections::HashMap, sync::Arc, thread};

use logmask::{FieldRule, Mask, MaskingEngine, MaskingOptions, MemberAction, TextMask};

fn rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("password").excluded(),
        FieldRule::new("FirstName").keep(1, 0),
        FieldRule::new("Iban").keep(3, 3),
        FieldRule::new("Email").keep(2, 4),
        FieldRule::new("Secret"),
    ]
}

fn engine() -> MaskingEngine {
    MaskingEngine::new(MaskingOptions::default().with_rules(rules()))
}

#[derive(Clone, Debug, Mask)]
struct Address {
    street: String,
    email: String,
}

#[derive(Clone, Debug, Mask)]
struct Customer {
    first_name: String,
    email: Option<String>,
    age: u32,
    address: Address,
    #[mask(prefix = 2, suffix = 2)]
    phone: String,
    #[mask(skip)]
    password_hint: String,
    tags: Vec<String>,
}

fn customer() -> Customer {
    Customer {
        first_name: "Jane".to_string(),
        email: Some("jane@example.com".to_string()),
        age: 41,
        address: Address {
            street: "Main Street 1".to_string(),
            email: "home@example.com".to_string(),
        },
        phone: "5551234567".to_string(),
        password_hint: "favourite pet".to_string(),
        tags: vec!["password".to_string(), "vip".to_string()],
    }
}

#[test]
fn test_struct_members_follow_rules_and_directives() {
    let engine = engine();
    let mut customer = customer();
    engine.mask(&mut customer);

    assert_eq!(customer.first_name, "J***");
    assert_eq!(customer.email.as_deref(), Some("ja**********.com"));
    assert_eq!(customer.age, 41);
    assert_eq!(customer.address.street, "Main Street 1");
    assert_eq!(customer.address.email, "ho**********.com");
    assert_eq!(customer.phone, "55******67");
    assert_eq!(customer.password_hint, "favourite pet");
    // Sequence elements carry no name, so a value equal to a rule name stays.
    assert_eq!(customer.tags, ["password", "vip"]);
}

#[test]
fn test_absent_optional_member_stays_absent() {
    let engine = engine();
    let mut customer = Customer {
        email: None,
        ..customer()
    };
    engine.mask(&mut customer);
    assert!(customer.email.is_none());
}

#[test]
fn test_directive_beats_rule() {
    #[derive(Debug, Mask)]
    struct Profile {
        #[mask(exclude)]
        first_name: String,
        #[mask(prefix = 1, suffix = 1)]
        password: String,
    }

    let engine = engine();
    let mut profile = Profile {
        first_name: "Jane".to_string(),
        password: "hunter2".to_string(),
    };
    engine.mask(&mut profile);
    assert_eq!(profile.first_name, "");
    assert_eq!(profile.password, "h*****2");
}

#[test]
fn test_directive_exclude_under_masked_exclusions_profile() {
    #[derive(Debug, Mask)]
    struct Profile {
        #[mask(exclude)]
        first_name: String,
    }

    let engine = MaskingEngine::new(MaskingOptions::masked_exclusions().with_rules(rules()));
    let mut profile = Profile {
        first_name: "Jane".to_string(),
    };
    engine.mask(&mut profile);
    assert_eq!(profile.first_name, "****");
}

#[test]
fn test_variant_matching_across_member_and_key_styles() {
    #[derive(Debug, Mask)]
    struct Pascal {
        FirstName: String,
    }

    #[derive(Debug, Mask)]
    struct Snake {
        first_name: String,
    }

    let engine = engine();
    let mut pascal = Pascal {
        FirstName: "Jonathan".to_string(),
    };
    let mut snake = Snake {
        first_name: "Jonathan".to_string(),
    };
    let mut map = HashMap::from([
        ("first_name".to_string(), "Jonathan".to_string()),
        ("firstName".to_string(), "Jonathan".to_string()),
        ("first-name".to_string(), "Jonathan".to_string()),
    ]);

    engine.mask(&mut pascal);
    engine.mask(&mut snake);
    engine.mask(&mut map);

    assert_eq!(pascal.FirstName, "J*******");
    assert_eq!(snake.first_name, pascal.FirstName);
    for value in map.values() {
        assert_eq!(value, &pascal.FirstName);
    }
}

#[test]
fn test_canonical_substring_match() {
    #[derive(Debug, Mask)]
    struct Transfer {
        FastIban: String,
        amount: i64,
    }

    let engine = engine();
    let mut transfer = Transfer {
        FastIban: "TR987654321098765432109876".to_string(),
        amount: 1200,
    };
    engine.mask(&mut transfer);

    assert_eq!(transfer.FastIban, format!("TR9{}876", "*".repeat(20)));
    assert_eq!(transfer.FastIban.chars().count(), 26);
    assert_eq!(transfer.amount, 1200);
}

#[test]
fn test_directive_on_composite_member_walks_into_it() {
    #[derive(Debug, Mask)]
    struct Order {
        #[mask(exclude)]
        shipping: Address,
        #[mask(prefix = 1, suffix = 1)]
        quantity: u32,
    }

    let engine = engine();
    let mut order = Order {
        shipping: Address {
            street: "Main Street 1".to_string(),
            email: "home@example.com".to_string(),
        },
        quantity: 3,
    };
    engine.mask(&mut order);

    assert_eq!(order.shipping.street, "Main Street 1");
    assert_eq!(order.shipping.email, "ho**********.com");
    assert_eq!(order.quantity, 3);
}

#[test]
fn test_field_name_alias_resolves_rules() {
    #[derive(Debug, Mask)]
    struct Login {
        #[mask(field_name = "password")]
        pin_code: String,
        #[mask(field_name = "password", prefix = 1)]
        recovery_code: String,
    }

    let engine = engine();
    let mut login = Login {
        pin_code: "1234".to_string(),
        recovery_code: "ABCDEF".to_string(),
    };
    engine.mask(&mut login);
    assert_eq!(login.pin_code, "");
    assert_eq!(login.recovery_code, "A*****");

    let plan = engine.plan_for::<Login>();
    assert_eq!(
        plan.action_for("password"),
        Some(MemberAction::Rule(TextMask::exclude()))
    );
    assert!(plan.action_for("pin_code").is_none());
}

#[test]
fn test_enum_variants_are_masked_by_field() {
    #[derive(Debug, Mask)]
    enum Contact {
        Email { email: String, verified: bool },
        Phone(#[mask(suffix = 2)] String),
        Anonymous,
    }

    let engine = engine();
    let mut contacts = vec![
        Contact::Email {
            email: "jane@example.com".to_string(),
            verified: true,
        },
        Contact::Phone("5551234567".to_string()),
        Contact::Anonymous,
    ];
    engine.mask(&mut contacts);

    match &contacts[0] {
        Contact::Email { email, verified } => {
            assert_eq!(email, "ja**********.com");
            assert!(*verified);
        }
        other => panic!("unexpected variant {other:?}"),
    }
    match &contacts[1] {
        Contact::Phone(number) => assert_eq!(number, "********67"),
        other => panic!("unexpected variant {other:?}"),
    }
    assert!(matches!(contacts[2], Contact::Anonymous));
}

#[test]
fn test_fieldless_enum_and_opaque_struct_are_untouched() {
    #[derive(Debug, PartialEq, Mask)]
    enum Status {
        Active,
    }

    #[derive(Debug, Mask)]
    #[mask(opaque)]
    struct Credentials {
        password: String,
    }

    #[derive(Debug, Mask)]
    struct Account {
        status: Status,
        credentials: Credentials,
        password: String,
    }

    let engine = engine();
    let mut account = Account {
        status: Status::Active,
        credentials: Credentials {
            password: "kept".to_string(),
        },
        password: "hidden".to_string(),
    };
    engine.mask(&mut account);

    assert_eq!(account.status, Status::Active);
    assert_eq!(account.credentials.password, "kept");
    assert_eq!(account.password, "");
}

#[test]
fn test_tuple_struct_members_only_follow_directives() {
    #[derive(Debug, Mask)]
    struct Pair(#[mask] String, String);

    let engine = engine();
    let mut pair = Pair("abc".to_string(), "password".to_string());
    engine.mask(&mut pair);
    assert_eq!(pair.0, "***");
    assert_eq!(pair.1, "password");
}

#[test]
fn test_generic_struct() {
    #[derive(Debug, Mask)]
    struct Envelope<T> {
        secret: String,
        payload: T,
    }

    let engine = engine();
    let mut envelope = Envelope {
        secret: "s3cr3t".to_string(),
        payload: customer(),
    };
    engine.mask(&mut envelope);
    assert_eq!(envelope.secret, "******");
    assert_eq!(envelope.payload.first_name, "J***");
}

#[test]
fn test_string_member_holding_json_is_masked() {
    #[derive(Debug, Mask)]
    struct Request {
        body: String,
    }

    let engine = engine();
    let mut request = Request {
        body: r#"{"password":"hiddenpassword","note":"ok"}"#.to_string(),
    };
    engine.mask(&mut request);
    assert_eq!(request.body, r#"{"password":"","note":"ok"}"#);
}

#[test]
fn test_mask_sequence_returns_new_vec_and_keeps_input() {
    let engine = engine();
    let customers = vec![customer(), customer()];
    let masked = engine.mask_sequence(&customers);

    assert_eq!(masked.len(), 2);
    assert!(masked.iter().all(|c| c.first_name == "J***"));
    assert!(customers.iter().all(|c| c.first_name == "Jane"));
}

#[test]
fn test_map_is_masked_in_place() {
    let engine = engine();
    let mut map: HashMap<String, Customer> = HashMap::new();
    map.insert("first".to_string(), customer());
    map.insert("Secret".to_string(), customer());

    engine.mask(&mut map);

    assert_eq!(map["first"].first_name, "J***");
    // A rule on the key only redacts strings; the composite is walked.
    assert_eq!(map["Secret"].first_name, "J***");
    assert_eq!(map["Secret"].phone, "55******67");
}

#[test]
fn test_disabled_engine_leaves_values_alone() {
    let engine = MaskingEngine::new(MaskingOptions::default().disabled().with_rules(rules()));
    let mut customer = customer();
    engine.mask(&mut customer);
    assert_eq!(customer.first_name, "Jane");
    assert_eq!(customer.phone, "5551234567");
}

#[test]
fn test_case_sensitive_engine_still_matches_style_variants() {
    let engine = MaskingEngine::new(
        MaskingOptions::default()
            .case_sensitive()
            .with_rule(FieldRule::new("first_name").keep(1, 0)),
    );
    let mut map = HashMap::from([
        ("FirstName".to_string(), "Jane".to_string()),
        ("FIRST_NAME".to_string(), "Jane".to_string()),
    ]);
    engine.mask(&mut map);
    assert_eq!(map["FirstName"], "J***");
    // `FIRST_NAME` tokenizes to first/name as well.
    assert_eq!(map["FIRST_NAME"], "J***");
}

#[test]
fn test_plan_is_built_once_per_engine() {
    let engine = engine();
    let first = engine.plan_for::<Customer>();
    let second = engine.plan_for::<Customer>();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 6);
    assert_eq!(
        first.action_for("phone"),
        Some(MemberAction::Directive(TextMask::keep(2, 2)))
    );
    assert_eq!(first.action_for("age"), Some(MemberAction::Traverse));
}

#[test]
fn test_engines_with_different_rules_do_not_share_plans() {
    let strict = engine();
    let lenient = MaskingEngine::new(MaskingOptions::default());

    let mut a = customer();
    let mut b = customer();
    strict.mask(&mut a);
    lenient.mask(&mut b);

    assert_eq!(a.first_name, "J***");
    assert_eq!(b.first_name, "Jane");
    assert_eq!(
        strict.plan_for::<Customer>().action_for("first_name"),
        Some(MemberAction::Rule(TextMask::keep(1, 0)))
    );
    assert_eq!(
        lenient.plan_for::<Customer>().action_for("first_name"),
        Some(MemberAction::Traverse)
    );
}

#[test]
fn test_engine_is_shared_across_threads() {
    let engine = Arc::new(engine());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut customer = customer();
                engine.mask(&mut customer);
                customer.first_name
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "J***");
    }
    assert!(Arc::ptr_eq(
        &engine.plan_for::<Customer>(),
        &engine.plan_for::<Customer>()
    ));
}
