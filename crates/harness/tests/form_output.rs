//! Parse-and-render pipeline tests for form generation.

use behat_harness::{FeatureSource, FeatureTemplate, FormGenerator};
use tempfile::TempDir;

const FEATURE_TEXT: &str = "\
Feature: Checkout discount

  # @param text amount \"Order Amount\" (100) Total before discount
  # @param yesno allowDiscount \"Allow Discount\" (no) Apply a discount?
  # @param currency \"Currency Code\"

  Scenario: Discounted order
    Given an order of <amount> <currency>
    And discounts allowed: <allowDiscount>
";

#[test]
fn feature_file_renders_one_element_per_declaration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checkout.feature");
    std::fs::write(&path, FEATURE_TEXT).unwrap();

    let source = FeatureSource::open(&path).unwrap();
    let html = FormGenerator::new().generate(&source.contents().unwrap());

    assert_eq!(html.matches("behat-form-element").count(), 3);
    // Defaults mark their elements, the bare declaration stays unmarked.
    assert_eq!(html.matches("behat-has-default-value").count(), 2);

    assert!(html.contains(r#"<input type="text" id="amount" name="amount" class="text" value="100"/>"#));
    assert!(html.contains(r#"<select id="allowDiscount" name="allowDiscount" class="yesno">"#));
    assert!(html.contains(r#"<option value="no" selected="selected">no</option>"#));
    // Omitted type tag renders through the text fallback.
    assert!(html.contains(r#"<input type="text" id="currency" name="currency" class="text"/>"#));

    assert!(html.contains(r#"<div class="behat-form-description">Total before discount</div>"#));
}

#[test]
fn form_keys_line_up_with_template_placeholders() {
    let params = behat_harness::parse_params(FEATURE_TEXT);
    let mut template = FeatureTemplate::from_text("checkout", FEATURE_TEXT);

    for key in params.keys() {
        template.apply(key, "X");
    }

    for key in params.keys() {
        let token = format!("<{key}>");
        assert!(
            !template.contents().contains(&token),
            "placeholder {token} should have been substituted"
        );
    }
}
