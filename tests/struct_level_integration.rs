//! End-to-end behavior of struct-level callbacks inside nested object graphs

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use plumbline::prelude::*;
use plumbline::{assert_namespaces, assert_success};

// Example domain types
#[derive(Debug, Clone, PartialEq)]
struct User {
    name: String,
    age: i32,
}

impl Reflect for User {
    fn reflect(&self) -> Value {
        StructValue::new("User")
            .field("Name", &self.name)
            .field("Age", &self.age)
            .into()
    }
}

#[derive(Debug, Clone)]
struct Address {
    zip: String,
}

impl Reflect for Address {
    fn reflect(&self) -> Value {
        StructValue::new("Address").field("Zip", &self.zip).into()
    }
}

#[derive(Debug, Clone)]
struct Member {
    name: String,
    address: Option<Address>,
}

impl Reflect for Member {
    fn reflect(&self) -> Value {
        StructValue::new("Member")
            .field_as("name", "Name", &self.name)
            .field("Address", &self.address)
            .into()
    }
}

#[derive(Debug, Clone)]
struct Company {
    members: Vec<Member>,
}

impl Reflect for Company {
    fn reflect(&self) -> Value {
        StructValue::new("Company")
            .field("Members", &self.members)
            .into()
    }
}

fn user_checks(sl: &mut dyn StructLevel) {
    let name = sl.current().field("Name").cloned().unwrap_or_default();
    let age = sl.current().field("Age").cloned().unwrap_or_default();

    if name.is_zero() {
        sl.report_error(&name, "Name", "Name", "required");
    }
    if matches!(age, Value::Int(n) if n < 0) {
        sl.report_error(&age, "Age", "Age", "gte");
    }
}

fn member(name: &str, zip: Option<&str>) -> Member {
    Member {
        name: name.to_string(),
        address: zip.map(|z| Address { zip: z.to_string() }),
    }
}

#[test]
fn test_user_errors_at_root() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let result = validate.validate_struct(&User {
        name: String::new(),
        age: -1,
    });

    let errors = result.into_result().unwrap_err();
    assert_eq!(errors.namespaces(), vec!["User.Name", "User.Age"]);
    let tags: Vec<&str> = errors.iter().map(FieldError::tag).collect();
    assert_eq!(tags, vec!["required", "gte"]);

    let age = errors.get(1).unwrap();
    assert_eq!(age.kind(), Kind::Int);
    assert_eq!(age.value(), Some(&Value::Int(-1)));
    assert_eq!(age.type_name(), Some("int"));
    assert_eq!(age.param(), "");
}

#[test]
fn test_user_errors_without_root_prefix() {
    let mut validate = Validate::with_config(Config::new().with_root_name(false));
    validate.register_struct_validation(user_checks, &["User"]);

    let result = validate.validate_struct(&User {
        name: String::new(),
        age: -1,
    });
    assert_namespaces!(result, ["Name", "Age"]);
}

#[test]
fn test_valid_user_passes() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    assert_success!(validate.validate_struct(&User {
        name: "Ada".into(),
        age: 36,
    }));
}

#[test]
fn test_order_merges_nested_batch() {
    let mut validate = Validate::new();
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| {
            let nested = ValidationErrors::from(vec![
                FieldError::new("email", "Email").with_namespace("Email", "Email")
            ]);
            sl.report_validation_errors("Customer", "Customer", nested);
        },
        &["Order"],
    );

    let order: Value = StructValue::new("Order").into();
    assert_namespaces!(validate.validate_value(&order), ["Order.Customer.Email"]);
}

#[test]
fn test_nested_run_from_callback() {
    let mut validate = Validate::new();
    validate.register_field_rule("Address", "Zip", "len", |v| v.to_string().len() == 5);
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| {
            // Re-validate the address at a position the traversal would not visit.
            let address = Address {
                zip: "1".to_string(),
            };
            if let Validation::Failure(errors) = sl.validator().validate_struct(&address) {
                sl.report_validation_errors("Billing", "billing", errors);
            }
        },
        &["Invoice"],
    );

    let invoice: Value = StructValue::new("Invoice").into();
    let errors = validate.validate_value(&invoice).into_result().unwrap_err();

    let err = errors.get(0).unwrap();
    assert_eq!(err.namespace(), "Invoice.Billing.Address.Zip");
    assert_eq!(err.struct_namespace(), "Invoice.billing.Address.Zip");
    assert_eq!(err.field(), "Zip");
    assert_eq!(err.tag(), "len");
}

#[test]
fn test_callback_depth_is_transparent() {
    let mut validate = Validate::new();
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| {
            let zip = sl.current().field("Zip").cloned().unwrap_or_default();
            if zip.is_zero() {
                sl.report_error(&zip, "Zip", "", "required");
            }
        },
        &["Address"],
    );

    let company = Company {
        members: vec![
            member("a", Some("12345")),
            member("b", None),
            member("c", Some("")),
        ],
    };

    // Same callback, reported relative to wherever the Address sits.
    assert_namespaces!(
        validate.validate_struct(&company),
        ["Company.Members[2].Address.Zip"]
    );

    let lone = Address { zip: String::new() };
    assert_namespaces!(validate.validate_struct(&lone), ["Address.Zip"]);
}

#[test]
fn test_display_and_actual_namespaces_diverge() {
    let mut validate = Validate::new();
    validate.register_field_rule("Member", "name", "required", |v| !v.is_zero());
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| sl.report_error(&"", "Nick", "nick", "custom"),
        &["Member"],
    );

    let company = Company {
        members: vec![member("", None)],
    };
    let errors = validate
        .validate_struct(&company)
        .into_result()
        .unwrap_err();

    assert_eq!(
        errors.namespaces(),
        vec!["Company.Members[0].Name", "Company.Members[0].Nick"]
    );
    let actual: Vec<&str> = errors.iter().map(FieldError::struct_namespace).collect();
    assert_eq!(
        actual,
        vec!["Company.Members[0].name", "Company.Members[0].nick"]
    );
    assert_eq!(errors.get(0).unwrap().struct_field(), "name");
    assert_eq!(errors.get(0).unwrap().field(), "Name");
}

#[test]
fn test_map_entries_use_bracketed_keys() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let mut members = BTreeMap::new();
    members.insert(
        "alice".to_string(),
        User {
            name: "Alice".into(),
            age: -5,
        },
    );
    members.insert(
        "bob".to_string(),
        User {
            name: String::new(),
            age: 1,
        },
    );
    let team: Value = StructValue::new("Team").field("Members", &members).into();

    assert_namespaces!(
        validate.validate_value(&team),
        ["Team.Members[alice].Age", "Team.Members[bob].Name"]
    );
}

#[test]
fn test_hash_map_paths_follow_key_order() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let bad = || User {
        name: "x".into(),
        age: -1,
    };
    let hashed: HashMap<i32, User> = [(10, bad()), (2, bad())].into_iter().collect();
    let ordered: BTreeMap<i32, User> = [(10, bad()), (2, bad())].into_iter().collect();

    let from_hash: Value = StructValue::new("R").field("M", &hashed).into();
    let from_tree: Value = StructValue::new("R").field("M", &ordered).into();

    assert_namespaces!(validate.validate_value(&from_hash), ["R.M[2].Age", "R.M[10].Age"]);
    assert_eq!(
        validate.validate_value(&from_hash),
        validate.validate_value(&from_tree)
    );
}

#[test]
fn test_position_accessors() {
    let seen: Arc<Mutex<Vec<(String, String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut validate = Validate::new();
    validate.register_struct_validation(
        move |sl: &mut dyn StructLevel| {
            let top = sl.top().type_name();
            let parent = sl.parent().type_name();
            let current = sl.current().type_name();
            // Repeated reads within one invocation agree.
            assert_eq!(sl.parent().type_name(), parent);
            assert_eq!(sl.current(), sl.current());
            sink.lock().unwrap().push((top, parent, current));
        },
        &["Company", "Member", "Address"],
    );

    let company = Company {
        members: vec![member("a", Some("12345"))],
    };
    assert_success!(validate.validate_struct(&company));

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("Company".into(), "Member".into(), "Address".into()),
            ("Company".into(), "Company".into(), "Member".into()),
            ("Company".into(), "Company".into(), "Company".into()),
        ]
    );
}

#[derive(Debug, Clone)]
struct Range {
    start: i64,
    end: i64,
}

impl Validatable for Range {
    fn validate(&self, sl: &mut dyn StructLevel) {
        if self.end < self.start {
            sl.report_error(&self.end, "End", "", "gtefield");
        }
    }
}

impl Reflect for Range {
    fn reflect(&self) -> Value {
        StructValue::new("Range")
            .field("Start", &self.start)
            .field("End", &self.end)
            .self_validating(self)
            .into()
    }
}

#[test]
fn test_self_validation_runs_after_registered_function() {
    let mut validate = Validate::new();
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| sl.report_error(&(), "Registered", "", "registered"),
        &["Range"],
    );

    let errors = validate
        .validate_struct(&Range { start: 3, end: 1 })
        .into_result()
        .unwrap_err();
    let tags: Vec<&str> = errors.iter().map(FieldError::tag).collect();
    assert_eq!(tags, vec!["registered", "gtefield"]);
    assert_eq!(errors.get(1).unwrap().namespace(), "Range.End");
}

#[test]
fn test_self_validation_inside_slices() {
    let ranges = vec![Range { start: 0, end: 1 }, Range { start: 5, end: 2 }];
    let schedule: Value = StructValue::new("Schedule").field("Slots", &ranges).into();

    assert_namespaces!(
        Validate::new().validate_value(&schedule),
        ["Schedule.Slots[1].End"]
    );
}

#[test]
fn test_failures_do_not_stop_siblings() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let users = vec![
        User {
            name: String::new(),
            age: 1,
        },
        User {
            name: "ok".into(),
            age: 1,
        },
        User {
            name: String::new(),
            age: -1,
        },
    ];
    let roster: Value = StructValue::new("Roster").field("Users", &users).into();

    assert_namespaces!(
        validate.validate_value(&roster),
        [
            "Roster.Users[0].Name",
            "Roster.Users[2].Name",
            "Roster.Users[2].Age"
        ]
    );
}

#[test]
fn test_field_rules_precede_struct_level_errors() {
    let mut validate = Validate::new();
    validate.register_field_rule("User", "Age", "max", |v| matches!(v, Value::Int(n) if *n < 150));
    validate.register_struct_validation(user_checks, &["User"]);

    let result = validate.validate_struct(&User {
        name: String::new(),
        age: 200,
    });
    let errors = result.into_result().unwrap_err();
    let tags: Vec<&str> = errors.iter().map(FieldError::tag).collect();
    assert_eq!(tags, vec!["max", "required"]);
}

#[test]
fn test_reporting_a_cloned_batch_twice() {
    let batch = ValidationErrors::from(vec![
        FieldError::new("required", "Email").with_namespace("Email", "Email")
    ]);
    let shared = batch.clone();

    let mut validate = Validate::new();
    validate.register_struct_validation(
        move |sl: &mut dyn StructLevel| {
            sl.report_validation_errors("Billing", "Billing", shared.clone());
            sl.report_validation_errors("Shipping", "Shipping", shared.clone());
        },
        &["Checkout"],
    );

    let checkout: Value = StructValue::new("Checkout").into();
    assert_namespaces!(
        validate.validate_value(&checkout),
        ["Checkout.Billing.Email", "Checkout.Shipping.Email"]
    );
    // The caller's copy keeps its relative paths.
    assert_eq!(batch.namespaces(), vec!["Email"]);
}

#[test]
fn test_custom_type_seen_through_extract_type() {
    let mut validate = Validate::new();
    validate.register_custom_type(
        |v: &Value| {
            if v.field("Valid") == Some(&Value::Bool(true)) {
                v.field("String").cloned().unwrap_or_default()
            } else {
                Value::Invalid
            }
        },
        &["NullString"],
    );
    validate.register_struct_validation(
        |sl: &mut dyn StructLevel| {
            let nick = sl.current().field("Nick").cloned().unwrap_or_default();
            let (_, kind, _) = sl.extract_type(&nick);
            if kind == Kind::Invalid {
                sl.report_error(&nick, "Nick", "", "required");
            }
        },
        &["Profile"],
    );

    let null = StructValue::new("NullString")
        .field("String", "")
        .field("Valid", &false);
    let profile: Value = StructValue::new("Profile").field("Nick", &null).into();

    let errors = validate.validate_value(&profile).into_result().unwrap_err();
    let err = errors.get(0).unwrap();
    assert_eq!(err.namespace(), "Profile.Nick");
    assert_eq!(err.kind(), Kind::Invalid);
    assert!(err.value().is_none());

    let set = StructValue::new("NullString")
        .field("String", "ada")
        .field("Valid", &true);
    let profile: Value = StructValue::new("Profile").field("Nick", &set).into();
    assert_success!(validate.validate_value(&profile));
}

#[test]
fn test_runs_are_isolated() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let bad = User {
        name: String::new(),
        age: 0,
    };
    let first = validate.validate_struct(&bad);
    let second = validate.validate_struct(&bad);
    assert_eq!(first, second);
    assert_namespaces!(second, ["User.Name"]);
}

#[test]
fn test_engine_shared_across_threads() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);
    let validate = Arc::new(validate);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validate = Arc::clone(&validate);
            std::thread::spawn(move || {
                let user = User {
                    name: if i % 2 == 0 { String::new() } else { "x".into() },
                    age: 1,
                };
                validate.validate_struct(&user).is_failure()
            })
        })
        .collect();

    let failures: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(failures, vec![true, false, true, false]);
}

#[test]
fn test_outcomes_of_separate_runs_combine() {
    let mut validate = Validate::new();
    validate.register_struct_validation(user_checks, &["User"]);

    let users = [
        User {
            name: String::new(),
            age: 1,
        },
        User {
            name: "ok".into(),
            age: 1,
        },
        User {
            name: "x".into(),
            age: -1,
        },
    ];

    let outcomes: Vec<_> = users.iter().map(|u| validate.validate_struct(u)).collect();
    assert_namespaces!(Validation::all_vec(outcomes), ["User.Name", "User.Age"]);

    let both = validate
        .validate_struct(&users[1])
        .and(validate.validate_struct(&users[0]));
    assert_namespaces!(both, ["User.Name"]);

    assert_success!(validate
        .validate_struct(&users[1])
        .and(validate.validate_struct(&users[1])));
}
