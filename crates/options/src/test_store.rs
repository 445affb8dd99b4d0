#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::*;

    #[test]
    fn defaults_come_from_schema() {
        let opts = Options::new();
        assert_eq!(
            opts.get("render.grid.subdivisions").unwrap(),
            &OptionValue::Int(10)
        );
        assert_eq!(opts.get_as_string("scene.up_direction").unwrap(), "+Y");
        assert_eq!(opts.get_as_string("ui.scale").unwrap(), "1");
        assert!(!opts.has_value("render.line_width"));
        assert!(opts.has_value("render.grid.enable"));
        assert!(!opts.names().contains(&"render.line_width"));
    }

    #[test]
    fn set_and_get_typed() {
        let mut opts = Options::new();
        opts.set("render.line_width", OptionValue::Double(2.5))
            .unwrap()
            .set("render.grid.enable", OptionValue::Bool(true))
            .unwrap();
        assert_eq!(opts.get_as_string("render.line_width").unwrap(), "2.5");
        assert_eq!(
            opts.get("render.grid.enable").unwrap(),
            &OptionValue::Bool(true)
        );

        opts.set("ui.scale", OptionValue::Double(0.5)).unwrap();
        assert_eq!(
            opts.get("ui.scale").unwrap(),
            &OptionValue::Ratio(Ratio(0.5))
        );

        opts.set(
            "model.color.texture",
            OptionValue::String("/tmp/./tex.png".into()),
        )
        .unwrap();
        assert_eq!(
            opts.get("model.color.texture").unwrap(),
            &OptionValue::Path(PathBuf::from("/tmp/./tex.png"))
        );

        opts.set(
            "render.background.color",
            OptionValue::DoubleVector(vec![1.0, 0.0, 0.0]),
        )
        .unwrap();
        assert_eq!(
            opts.get_as_string("render.background.color").unwrap(),
            "#ff0000"
        );
    }

    #[test]
    fn set_rejects_incompatible_values() {
        let mut opts = Options::new();
        let err = opts
            .set("render.grid.enable", OptionValue::Int(1))
            .unwrap_err();
        assert!(matches!(err, Error::Incompatible { .. }));
        assert_eq!(err.name(), "render.grid.enable");

        let err = opts
            .set(
                "render.background.color",
                OptionValue::DoubleVector(vec![1.0, 0.0]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Incompatible { .. }));
        assert_eq!(
            opts.get("render.background.color").unwrap(),
            &OptionValue::Color(Color([0.2, 0.2, 0.2]))
        );
    }

    #[test]
    fn string_access() {
        let mut opts = Options::new();
        opts.set_as_string("scene.up_direction", "-z").unwrap();
        assert_eq!(opts.get_as_string("scene.up_direction").unwrap(), "-Z");

        opts.set_as_string("model.scivis.range", "0, 1").unwrap();
        assert_eq!(opts.get_as_string("model.scivis.range").unwrap(), "0,1");

        let err = opts
            .set_as_string("render.grid.subdivisions", "many")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("render.grid.subdivisions"));
        assert_eq!(
            opts.get_as_string("render.grid.subdivisions").unwrap(),
            "10"
        );
    }

    #[test]
    fn unknown_names() {
        let mut opts = Options::new();
        assert!(matches!(
            opts.get("render.nope"),
            Err(Error::Inexistent { .. })
        ));
        assert!(matches!(
            opts.set_as_string("render.nope", "1"),
            Err(Error::Inexistent { .. })
        ));
        assert!(matches!(
            Options::kind("render.nope"),
            Err(Error::Inexistent { .. })
        ));
        assert!(!opts.has_value("render.nope"));
    }

    #[test]
    fn optional_without_value() {
        let mut opts = Options::new();
        let err = opts.get_as_string("scene.camera.index").unwrap_err();
        assert!(matches!(err, Error::NoValue { .. }));
        assert!(Options::is_optional("scene.camera.index").unwrap());
        assert!(!Options::is_optional("render.grid.enable").unwrap());

        opts.set_as_string("scene.camera.index", "2").unwrap();
        assert!(opts.has_value("scene.camera.index"));
        opts.remove_value("scene.camera.index").unwrap();
        assert!(!opts.has_value("scene.camera.index"));

        assert!(matches!(
            opts.remove_value("render.grid.enable"),
            Err(Error::Incompatible { .. })
        ));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut opts = Options::new();
        opts.set_as_string("render.grid.subdivisions", "3")
            .unwrap()
            .set_as_string("render.point_size", "4")
            .unwrap();
        opts.reset("render.grid.subdivisions")
            .unwrap()
            .reset("render.point_size")
            .unwrap();
        assert_eq!(
            opts.get_as_string("render.grid.subdivisions").unwrap(),
            "10"
        );
        assert!(!opts.has_value("render.point_size"));
        assert_eq!(opts, Options::new());
    }

    #[test]
    fn toggle_booleans() {
        let mut opts = Options::new();
        opts.toggle("render.grid.enable").unwrap();
        assert_eq!(opts.get_as_string("render.grid.enable").unwrap(), "true");
        opts.toggle("render.grid.enable").unwrap();
        assert_eq!(opts.get_as_string("render.grid.enable").unwrap(), "false");

        opts.toggle("render.show_edges").unwrap();
        assert_eq!(opts.get_as_string("render.show_edges").unwrap(), "true");

        assert!(matches!(
            opts.toggle("render.grid.subdivisions"),
            Err(Error::Incompatible { .. })
        ));
    }

    #[test]
    fn compare_and_copy() {
        let mut a = Options::new();
        let b = Options::new();
        assert!(a.is_same(&b, "render.line_width").unwrap());
        assert!(a.is_same(&b, "render.grid.color").unwrap());

        a.set_as_string("render.line_width", "3").unwrap();
        assert!(!a.is_same(&b, "render.line_width").unwrap());

        let mut c = Options::new();
        c.copy_from(&a, "render.line_width").unwrap();
        assert!(c.is_same(&a, "render.line_width").unwrap());

        c.copy_from(&b, "render.line_width").unwrap();
        assert!(!c.has_value("render.line_width"));

        assert!(matches!(
            a.is_same(&b, "render.nope"),
            Err(Error::Inexistent { .. })
        ));
    }

    #[test]
    fn closest_option_suggestion() {
        assert_eq!(
            Options::closest_option("modle.sciivs.cell"),
            ("model.scivis.cells".to_string(), 5)
        );
        assert_eq!(
            Options::closest_option("render.grid.enable"),
            ("render.grid.enable".to_string(), 0)
        );
    }

    #[test]
    fn schema_is_sorted_and_reserved_prefix_unused() {
        let names = Options::all_names();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        assert!(names.iter().all(|n| !n.starts_with("reset-")));
        for spec in schema() {
            if let Some(default) = &spec.default {
                assert_eq!(default.kind(), spec.kind, "{}", spec.name);
            }
        }
    }
}
