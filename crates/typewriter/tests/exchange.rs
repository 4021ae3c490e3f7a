//! End-to-end export/load scenarios through the global registry.

use serde_json::{json, Value};
use typewriter::{
    export, export_dyn, load, load_as, Attributes, ExportError, Exportable, LoadError, TypeName,
    TYPE_KEY,
};

#[derive(Debug, PartialEq)]
struct Point {
    x: i64,
    y: i64,
}

impl Exportable for Point {
    fn export(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("x".to_string(), json!(self.x));
        attrs.insert("y".to_string(), json!(self.y));
        attrs
    }

    fn load(data: Attributes) -> Result<Self, LoadError> {
        let x = data
            .get("x")
            .and_then(Value::as_i64)
            .ok_or_else(|| LoadError::missing_attribute("x"))?;
        let y = data
            .get("y")
            .and_then(Value::as_i64)
            .ok_or_else(|| LoadError::missing_attribute("y"))?;
        Ok(Point { x, y })
    }
}

#[derive(Debug, PartialEq)]
struct Note {
    body: String,
    pinned: bool,
}

impl Exportable for Note {
    fn export(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("body".to_string(), json!(self.body));
        attrs.insert("pinned".to_string(), json!(self.pinned));
        attrs
    }

    fn load(data: Attributes) -> Result<Self, LoadError> {
        let body = data
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| LoadError::missing_attribute("body"))?
            .to_string();
        let pinned = match data.get("pinned") {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| LoadError::invalid_attribute("pinned", "expected a boolean"))?,
            None => false,
        };
        Ok(Note { body, pinned })
    }
}

fn register_fixtures() {
    typewriter::global().register::<Point>().unwrap();
    typewriter::global().register::<Note>().unwrap();
}

#[test]
fn test_point_scenario() {
    register_fixtures();
    let exported = export(&Point { x: 1, y: 2 }).unwrap();

    let name = TypeName::of::<Point>().unwrap();
    assert_eq!(exported.get("x"), Some(&json!(1)));
    assert_eq!(exported.get("y"), Some(&json!(2)));
    assert_eq!(exported.get(TYPE_KEY), Some(&json!(name.as_str())));
    assert!(name.as_str().ends_with(".Point"));

    let restored: Point = load_as(exported).unwrap();
    assert_eq!(restored, Point { x: 1, y: 2 });
}

#[test]
fn test_round_trip_produces_an_independent_equal_instance() {
    register_fixtures();
    let original = Note {
        body: "remember".to_string(),
        pinned: true,
    };
    let restored: Note = load_as(export(&original).unwrap()).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_dynamic_load_then_dynamic_export_round_trips() {
    register_fixtures();
    let exported = export(&Point { x: 4, y: 5 }).unwrap();

    let boxed = load(exported.clone()).unwrap();
    let re_exported = export_dyn(boxed.as_ref()).unwrap();
    assert_eq!(re_exported, exported);
}

#[test]
fn test_load_survives_json_round_trip() {
    register_fixtures();
    let exported = export(&Point { x: -3, y: 9 }).unwrap();

    // Simulate crossing a process boundary as a JSON document.
    let text = serde_json::to_string(&exported).unwrap();
    let parsed: Attributes = serde_json::from_str(&text).unwrap();

    let restored: Point = load_as(parsed).unwrap();
    assert_eq!(restored, Point { x: -3, y: 9 });
}

#[test]
fn test_hand_constructed_mapping_loads() {
    register_fixtures();
    let name = TypeName::of::<Note>().unwrap();
    let mut data = Attributes::new();
    data.insert(TYPE_KEY.to_string(), json!(name.as_str()));
    data.insert("body".to_string(), json!("bare"));

    // "pinned" is absent; the type's own factory decides the default.
    let restored: Note = load_as(data).unwrap();
    assert_eq!(
        restored,
        Note {
            body: "bare".to_string(),
            pinned: false,
        }
    );
}

#[test]
fn test_factory_errors_pass_through_unchanged() {
    register_fixtures();
    let name = TypeName::of::<Point>().unwrap();
    let mut data = Attributes::new();
    data.insert(TYPE_KEY.to_string(), json!(name.as_str()));
    data.insert("x".to_string(), json!(1));

    let err = load(data).unwrap_err();
    assert!(matches!(err, LoadError::MissingAttribute { ref attribute } if attribute == "y"));

    let mut data = Attributes::new();
    data.insert(TYPE_KEY.to_string(), json!(TypeName::of::<Note>().unwrap().as_str()));
    data.insert("body".to_string(), json!("x"));
    data.insert("pinned".to_string(), json!("yes"));
    let err = load(data).unwrap_err();
    assert!(matches!(err, LoadError::InvalidAttribute { .. }));
}

#[test]
fn test_load_as_rejects_mismatched_tag() {
    register_fixtures();
    let exported = export(&Point { x: 0, y: 0 }).unwrap();
    let err = load_as::<Note>(exported).unwrap_err();
    assert!(matches!(err, LoadError::TypeMismatch { .. }));
}

#[test]
fn test_unregistered_tag_fails_with_resolution_error() {
    let mut data = Attributes::new();
    data.insert(TYPE_KEY.to_string(), json!("nonexistent.module.Thing"));
    let err = load(data).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Resolution(typewriter::ResolutionError::NotRegistered { .. })
    ));
}

#[test]
fn test_reserved_key_collision_is_rejected() {
    struct Hostile;

    impl Exportable for Hostile {
        fn export(&self) -> Attributes {
            let mut attrs = Attributes::new();
            attrs.insert(TYPE_KEY.to_string(), json!("spoofed.Name"));
            attrs
        }

        fn load(_data: Attributes) -> Result<Self, LoadError> {
            Ok(Hostile)
        }
    }

    assert!(matches!(
        export(&Hostile),
        Err(ExportError::ReservedKey { .. })
    ));
}
