use figment::Jail;
use vs_config::SummaryConfig;
use vs_core::ReportVariant;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("VARS_SUMMARY_DATABASE__URL", "env.db");
        jail.set_env("VARS_SUMMARY_KB__TIMEOUT_SECS", "25");
        jail.set_env("VARS_SUMMARY_OUTPUT__VARIANT", "observations");

        let config = SummaryConfig::load().expect("config loads");
        assert_eq!(config.database.url, "env.db");
        assert_eq!(config.kb.timeout_secs, 25);
        assert_eq!(config.output.variant, ReportVariant::Observations);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            vs_config::LOCAL_CONFIG_FILE,
            r#"
[kb]
rank = "family"
"#,
        )?;
        jail.set_env("VARS_SUMMARY_KB__RANK", "order");

        let config = SummaryConfig::load().expect("config loads");
        assert_eq!(config.kb.rank, "order");
        Ok(())
    });
}
