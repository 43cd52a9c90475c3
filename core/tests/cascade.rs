use catalog_forms_core::{
    decode_model_list, Cascade, DependentSelect, LookupError, LookupOutcome, ModelOption,
    SelectOption, PLACEHOLDER_LABEL,
};

#[derive(Default)]
struct FakeSelect {
    options: Vec<SelectOption>,
    disabled: bool,
    writes: usize,
}

impl DependentSelect for FakeSelect {
    fn replace_options(&mut self, options: &[SelectOption]) {
        self.options = options.to_vec();
        self.writes += 1;
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

fn models(names: &[(&str, &str)]) -> Vec<ModelOption> {
    names
        .iter()
        .map(|(id, name)| ModelOption {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[test]
fn brand_selection_populates_models() {
    let mut cascade = Cascade::new(FakeSelect {
        disabled: true,
        ..FakeSelect::default()
    });
    let request = cascade.on_brand_change("5").expect("lookup request");
    assert_eq!(request.brand_id, "5");
    assert_eq!(request.url("/api/models/"), "/api/models/?brand_id=5");

    let data = decode_model_list(r#"[{"id":1,"name":"A"},{"id":2,"name":"B"}]"#).unwrap();
    let outcome = cascade.on_lookup_complete(request.token, Ok(data));
    assert_eq!(outcome, LookupOutcome::Applied { count: 2 });

    let select = cascade.select();
    let labels: Vec<&str> = select.options.iter().map(|o| o.label.as_str()).collect();
    let values: Vec<&str> = select.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(labels, vec![PLACEHOLDER_LABEL, "A", "B"]);
    assert_eq!(values, vec!["", "1", "2"]);
    assert!(!select.disabled);
}

#[test]
fn empty_brand_resets_and_disables() {
    let mut cascade = Cascade::new(FakeSelect::default());
    let request = cascade.on_brand_change("3").unwrap();
    cascade.on_lookup_complete(request.token, Ok(models(&[("9", "Z")])));

    assert_eq!(cascade.on_brand_change(""), None);
    let select = cascade.select();
    assert_eq!(select.options, vec![SelectOption::placeholder()]);
    assert!(select.disabled);
}

#[test]
fn failure_keeps_previous_options() {
    let mut cascade = Cascade::new(FakeSelect::default());
    let first = cascade.on_brand_change("1").unwrap();
    cascade.on_lookup_complete(first.token, Ok(models(&[("10", "Alpha")])));

    let second = cascade.on_brand_change("2").unwrap();
    let outcome = cascade.on_lookup_complete(second.token, Err(LookupError::Status(500)));
    assert_eq!(outcome, LookupOutcome::Failed(LookupError::Status(500)));
    assert_eq!(cascade.select().options.len(), 2);
    assert_eq!(cascade.select().options[1].label, "Alpha");
}

#[test]
fn stale_response_is_discarded() {
    let mut cascade = Cascade::new(FakeSelect::default());
    let slow = cascade.on_brand_change("1").unwrap();
    let fast = cascade.on_brand_change("2").unwrap();
    assert!(fast.token > slow.token);

    cascade.on_lookup_complete(fast.token, Ok(models(&[("20", "Two")])));
    let outcome = cascade.on_lookup_complete(slow.token, Ok(models(&[("10", "One")])));
    assert_eq!(outcome, LookupOutcome::Stale);
    assert_eq!(cascade.select().options[1].label, "Two");
    assert_eq!(cascade.select().writes, 1);
}

#[test]
fn reset_invalidates_in_flight_lookup() {
    let mut cascade = Cascade::new(FakeSelect::default());
    let pending = cascade.on_brand_change("4").unwrap();
    cascade.on_brand_change("");
    let outcome = cascade.on_lookup_complete(pending.token, Ok(models(&[("1", "A")])));
    assert_eq!(outcome, LookupOutcome::Stale);
    assert!(cascade.select().disabled);
    assert_eq!(cascade.latest_token(), None);
}

#[test]
fn any_non_empty_brand_value_is_looked_up() {
    let mut cascade = Cascade::new(FakeSelect::default());
    let request = cascade.on_brand_change(" ").expect("lookup request");
    assert_eq!(request.brand_id, " ");
    assert_eq!(request.url("/api/models/"), "/api/models/?brand_id=+");
    assert!(cascade.select().options.is_empty());
}
