use fitmenu::models::{Config, MacroLayout};

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fitmenu.toml");
    let config = Config::load(path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.extraction.macro_layout, MacroLayout::Positional);
    assert_eq!(config.menu.len(), 5);
    assert_eq!(config.supplements.len(), 2);
    assert_eq!(config.basket.start_date.to_string(), "2023-02-06");
    assert_eq!(config.program.page_path, "/programe/creste-masa-musculara");
}
