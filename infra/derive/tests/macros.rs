#[test]
fn teaser_error_expands() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/teaser_error_pass.rs");
}

#[test]
fn api_model_expands() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/api_model_pass.rs");
}
