use catalog_forms_core::{autofill_slug, slugify, Slug, SlugError};

#[test]
fn slugify_known_names() {
    assert_eq!(slugify("Red Leather Jacket"), "red-leather-jacket");
    assert_eq!(slugify("  --Bold!!--  "), "bold");
    assert_eq!(slugify("iPhone 15 Pro Max"), "iphone-15-pro-max");
    assert_eq!(slugify(""), "");
}

#[test]
fn slugify_is_idempotent() {
    let samples = [
        "Red Leather Jacket",
        "  --Bold!!--  ",
        "Ünïcödé & Friends",
        "a__b__c",
        "already-a-slug",
        "Trailing   ",
        "42",
    ];
    for sample in samples {
        let once = slugify(sample);
        assert_eq!(slugify(&once), once, "slugify not idempotent for {sample:?}");
    }
}

#[test]
fn slugify_output_is_always_valid_or_empty() {
    for sample in ["x", "--x--", "A B  C", "(1)(2)", "é"] {
        let slug = slugify(sample);
        assert!(slug.is_empty() || Slug::parse(&slug).is_ok(), "{slug:?}");
    }
}

#[test]
fn autofill_keeps_manual_slug() {
    assert_eq!(autofill_slug("x", "Anything"), None);
}

#[test]
fn autofill_fills_empty_slug() {
    let slug = autofill_slug("", "Red Leather Jacket").expect("slug");
    assert_eq!(slug.as_str(), "red-leather-jacket");
    assert_eq!(autofill_slug("", "!!!"), None);
}

#[test]
fn parsed_slug_round_trips_through_display() {
    let slug: Slug = "blue-jeans-42".parse().unwrap();
    assert_eq!(slug.to_string(), "blue-jeans-42");
    assert_eq!("Blue".parse::<Slug>(), Err(SlugError::InvalidCharacter { ch: 'B', index: 0 }));
}
