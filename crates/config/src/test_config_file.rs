#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use logging::capture;
    use tracing::Level;

    use crate::*;

    fn parse(text: &str) -> Result<ParsedConfig, Error> {
        parse_config_str(text, Path::new("/etc/f3d/config.json"))
    }

    #[test]
    fn block_form() {
        let parsed = parse(
            r#"[
                { "options": { "axis": true, "up": "+Z" } },
                { "match": "*.stl", "match-type": "glob", "options": { "edges": true } },
                { "match": "/data/cow.vtp", "match-type": "exact", "options": { "grid": false } },
                { "match": ".*vtu", "options": { "opacity": 0.5 } },
                { "imperative": true, "options": { "fps": true } },
                { "bindings": { "Ctrl+Q": "exit" } }
            ]"#,
        )
        .unwrap();

        assert_eq!(parsed.options.len(), 5);
        assert_eq!(parsed.imperative.len(), 1);

        let first = &parsed.options[0];
        assert_eq!(first.source, "/etc/f3d/config.json");
        assert_eq!(first.match_type, MatchType::Regex);
        assert_eq!(first.pattern, ".*");
        assert_eq!(first.options, dict([("axis", "true"), ("up", "+Z")]));

        assert_eq!(parsed.options[1].match_type, MatchType::Glob);
        assert_eq!(parsed.options[1].pattern, "*.stl");
        assert_eq!(parsed.options[2].match_type, MatchType::Exact);
        assert_eq!(parsed.options[3].match_type, MatchType::Regex);
        assert_eq!(parsed.options[3].options, dict([("opacity", "0.5")]));
        assert!(parsed.options[4].options.is_empty());

        assert_eq!(parsed.imperative[0].options, dict([("fps", "true")]));
        assert_eq!(
            parsed.imperative[0].origin(),
            "/etc/f3d/config.json:`.*` (regex)"
        );
    }

    #[test]
    fn legacy_object_form() {
        let parsed = parse(r#"{ ".*vtu": { "edges": true }, ".*": { "axis": true } }"#).unwrap();
        let patterns: Vec<&str> = parsed.options.iter().map(|e| e.pattern.as_str()).collect();
        assert_eq!(patterns, vec![".*", ".*vtu"]);
        assert!(parsed.options.iter().all(|e| e.match_type == MatchType::Regex));
        assert!(parsed.imperative.is_empty());
    }

    #[test]
    fn values_become_option_strings() {
        let (parsed, logs) = capture(|| {
            parse(
                r#"[{ "options": {
                    "resolution": [800, 600],
                    "line-width": 2,
                    "background-color": [0.1, 0.2, 0.3],
                    "font-file": null,
                    "camera-position": [[1, 2], 3],
                    "hdri-file": { "path": "sky.hdr" },
                    "axis": false
                } }]"#,
            )
        });
        let entry = &parsed.unwrap().options[0];
        assert_eq!(
            entry.options,
            dict([
                ("axis", "false"),
                ("background-color", "0.1,0.2,0.3"),
                ("line-width", "2"),
                ("resolution", "800,600"),
            ])
        );
        let warnings = logs.messages(Level::WARN);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("Ignoring 'camera-position' in /etc/f3d/config.json"));
        assert!(logs.contains(Level::WARN, "Ignoring 'font-file'"));
        assert!(logs.contains(Level::WARN, "Ignoring 'hdri-file'"));
    }

    #[test]
    fn syntax_errors_point_at_the_location() {
        let err = parse("[\n  { \"options\": { \"axis\": tru } }\n]").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert_eq!(err.path(), Some(Path::new("/etc/f3d/config.json")));
        let pretty = err.pretty();
        assert!(pretty.starts_with("Syntax error in config file /etc/f3d/config.json:2:"));
        assert!(pretty.contains("\n1 | [\n2 |   { \"options\": { \"axis\": tru } }\n  | "));
        assert!(pretty.ends_with('^'));
    }

    #[test]
    fn shape_errors_are_validation_errors() {
        for text in [r#"{ "options": 3 }"#, r#"[{ "matches": ".*" }]"#, "42"] {
            let err = parse(text).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{text}");
            assert!(err.pretty().starts_with("Invalid config file /etc/f3d/config.json: "));
        }
    }

    #[test]
    fn excerpt_marks_the_column() {
        let excerpt = excerpt_at("one\ntwo\nthree\nfour", 3, 2);
        assert_eq!(excerpt, "2 | two\n3 | three\n  |  ^");

        let excerpt = excerpt_at("first", 1, 1);
        assert_eq!(excerpt, "1 | first\n  | ^");
    }

    #[test]
    fn config_files_are_found_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("config.json"), "[]").unwrap();
        fs::create_dir(root.join("config.d")).unwrap();
        fs::write(root.join("config.d/20_b.json"), "[]").unwrap();
        fs::write(root.join("config.d/10_a.json"), "[]").unwrap();
        fs::write(root.join("config.d/notes.txt"), "").unwrap();
        fs::write(root.join("custom.json"), "[]").unwrap();

        let dirs = vec![root.to_path_buf()];
        assert_eq!(
            find_config_files("", &dirs),
            vec![
                root.join("config.json"),
                root.join("config.d/10_a.json"),
                root.join("config.d/20_b.json"),
            ]
        );
        assert_eq!(find_config_files("custom", &dirs), vec![root.join("custom.json")]);

        let explicit = root.join("custom.json");
        assert_eq!(
            find_config_files(&explicit.to_string_lossy(), &[]),
            vec![explicit.clone()]
        );
        let config_d = root.join("config.d");
        assert_eq!(
            find_config_files(&config_d.to_string_lossy(), &[]),
            vec![config_d.join("10_a.json"), config_d.join("20_b.json")]
        );
    }

    #[test]
    fn broken_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("config.json"), r#"[{ "options": { "axis": true } }]"#).unwrap();
        fs::create_dir(root.join("config.d")).unwrap();
        fs::write(root.join("config.d/broken.json"), "[{").unwrap();
        fs::write(
            root.join("config.d/late.json"),
            r#"[{ "imperative": true, "options": { "grid": true } }]"#,
        )
        .unwrap();

        let (parsed, logs) = capture(|| read_config_files("", &[root.to_path_buf()]));
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.imperative.len(), 1);
        assert_eq!(logs.count(Level::ERROR), 1);
        assert!(logs.contains(Level::ERROR, "broken.json"));

        let (parsed, logs) = capture(|| read_config_files("nothing", &[root.to_path_buf()]));
        assert_eq!(parsed, ParsedConfig::default());
        assert!(logs.contains(Level::WARN, "\"nothing\" could not be found"));
    }

    #[test]
    fn search_dirs_end_with_colormaps() {
        let dirs = config_search_dirs();
        assert_eq!(dirs[0], Path::new("/etc/f3d"));
        let colormaps = colormap_search_dirs(&dirs);
        assert_eq!(colormaps.len(), dirs.len());
        assert!(colormaps.iter().all(|d| d.ends_with("colormaps")));
    }
}
