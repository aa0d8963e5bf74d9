//! Integration tests for building, updating and reading fields

use fieldsmith::{
    field_value, normalize, Element, FieldBuilder, FieldKind, FieldRequest, FieldValue,
    FormsError, Surface,
};

fn control(wrapper: &Element) -> &Element {
    wrapper.child_elements().nth(1).unwrap()
}

fn sample_value(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Checkbox => FieldValue::Bool(true),
        FieldKind::Select => FieldValue::from("b"),
        FieldKind::Date => FieldValue::from("2024-05-01"),
        FieldKind::Time => FieldValue::from("13:45"),
        FieldKind::Datetime => FieldValue::from("2024-05-01T13:45"),
        FieldKind::Email => FieldValue::from("pilot@example.com"),
        FieldKind::Url => FieldValue::from("https://example.com"),
        FieldKind::BasicInt | FieldKind::Number | FieldKind::Range => FieldValue::from("42"),
        _ => FieldValue::from("hello"),
    }
}

#[test]
fn build_then_read_returns_the_value_for_every_kind() {
    let builder = FieldBuilder::new();
    for kind in FieldKind::ALL {
        let value = sample_value(kind);
        let wrapper = builder
            .build(
                &FieldRequest::new(kind.as_str())
                    .with_choice("a", "A")
                    .with_choice("b", "B")
                    .with_value(value.clone()),
            )
            .unwrap();
        assert_eq!(field_value(control(&wrapper)), value, "{kind}");
    }
}

#[test]
fn checkbox_false_reads_false() {
    let wrapper = FieldBuilder::new()
        .build(&FieldRequest::new("checkbox").with_value(false))
        .unwrap();
    assert_eq!(field_value(control(&wrapper)), FieldValue::Bool(false));
}

#[test]
fn normalizer_is_idempotent() {
    let request = FieldRequest::from_json(
        r#"{"field_type": "email", "label": "Contact", "html_attributes": {"multiple": true}}"#,
    )
    .unwrap();
    let once = normalize(&request);
    let twice = normalize(&FieldRequest::from(once.clone()));
    assert_eq!(once, twice);
}

#[test]
fn update_is_idempotent() {
    let builder = FieldBuilder::new();
    let build_request = FieldRequest::new("number").with_id("laps");
    let update = FieldRequest::new("number")
        .with_id("laps")
        .with_value(7)
        .with_data("heat", 2);

    let mut once = Surface::new();
    once.insert(builder.build(&build_request).unwrap());
    once.update_field(&builder, &update).unwrap();

    let mut twice = Surface::new();
    twice.insert(builder.build(&build_request).unwrap());
    twice.update_field(&builder, &update).unwrap();
    twice.update_field(&builder, &update).unwrap();

    assert_eq!(once.elements(), twice.elements());
    assert_eq!(twice.value_of("laps").unwrap(), FieldValue::from("7"));
}

#[test_log::test]
fn unsupported_kind_is_rejected_without_touching_the_surface() {
    let builder = FieldBuilder::new();
    let mut surface = Surface::new();

    let result = builder.build(&FieldRequest::new("bogus").with_label("Nope"));
    assert!(matches!(result, Err(FormsError::UnsupportedKind { ref kind }) if kind == "bogus"));
    if let Ok(wrapper) = result {
        surface.insert(wrapper);
    }
    assert!(surface.elements().is_empty());

    let missing = builder.build(&FieldRequest::default());
    assert!(matches!(missing, Err(FormsError::MissingKind)));
}

#[test]
fn select_defaults_to_first_choice() {
    let request = FieldRequest::from_json(
        r#"{
            "field_type": "select",
            "options": [{"value": "a", "label": "A"}, {"value": "b", "label": "B"}]
        }"#,
    )
    .unwrap();
    let wrapper = FieldBuilder::new().build(&request).unwrap();
    let select = control(&wrapper);
    assert_eq!(field_value(select), FieldValue::from("a"));
    assert!(select.child_elements().next().unwrap().is_selected());
}

#[test]
fn text_exposes_exactly_the_requested_bounds() {
    let wrapper = FieldBuilder::new()
        .build(
            &FieldRequest::new("text")
                .with_id("callsign")
                .with_constraint("minlength", 2)
                .with_constraint("maxlength", 5)
                .with_constraint("min", 1),
        )
        .unwrap();
    let input = control(&wrapper);
    let attrs: Vec<_> = input.attr_names().collect();
    assert_eq!(attrs, vec!["type", "minlength", "maxlength", "id"]);
    assert_eq!(input.attr("minlength"), Some("2"));
    assert_eq!(input.attr("maxlength"), Some("5"));
}

#[test]
fn synthesized_identifiers_are_distinct() {
    let builder = FieldBuilder::new();
    let a = builder.build(&FieldRequest::new("text")).unwrap();
    let b = builder.build(&FieldRequest::new("text")).unwrap();

    let id_a = control(&a).id().unwrap().to_string();
    let id_b = control(&b).id().unwrap().to_string();
    assert_ne!(id_a, id_b);
    assert!(id_a.starts_with("setting_"));

    let label = a.find(&|e| e.tag() == "label").unwrap();
    assert_eq!(label.attr("for"), Some(id_a.as_str()));
}

#[test]
fn synthesized_identifier_relocates_the_widget() {
    let builder = FieldBuilder::new();
    let mut surface = Surface::new();
    let wrapper = builder.build(&FieldRequest::new("tel")).unwrap();
    let id = control(&wrapper).id().unwrap().to_string();
    surface.insert(wrapper);

    surface
        .update_field(
            &builder,
            &FieldRequest::new("tel").with_id(id.as_str()).with_value("555-0100"),
        )
        .unwrap();
    assert_eq!(surface.value_of(&id).unwrap(), FieldValue::from("555-0100"));
}

#[test]
fn rendered_html_for_a_complete_field() {
    let wrapper = FieldBuilder::new()
        .build(
            &FieldRequest::new("text")
                .with_id("name")
                .with_label("Name")
                .with_description("Pilot <name>")
                .with_constraint("maxlength", 12)
                .with_value("Ada"),
        )
        .unwrap();
    assert_eq!(
        wrapper.to_html(),
        concat!(
            "<div>",
            "<div class=\"label-block\"><label for=\"name\">Name</label>",
            "<p class=\"desc\">Pilot &lt;name&gt;</p></div>",
            "<input type=\"text\" maxlength=\"12\" id=\"name\" value=\"Ada\">",
            "</div>"
        )
    );
}
