#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::*;

    const OUT_OF_RANGE: &str = "1234567890123456789012345678901234567890123456789012345678901234567890\
        1234567890123456789012345678901234567890123456789012345678901234567890\
        1234567890123456789012345678901234567890123456789012345678901234567890\
        1234567890123456789012345678901234567890123456789012345678901234567890\
        1234567890123456789012345678901234567890123456789012345678901234567890";

    fn approx(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn bool_forms() {
        for (text, expected) in [
            ("true", true),
            ("false", false),
            ("yes", true),
            ("Yes", true),
            ("no", false),
            ("1", true),
            ("0", false),
        ] {
            assert_eq!(parse::<bool>(text).unwrap(), expected, "{text}");
        }
        assert!(parse::<bool>("foo").is_err());
        assert_eq!(format(&true), "true");
        assert_eq!(format(&false), "false");
    }

    #[test]
    fn int_forms() {
        assert_eq!(parse::<i32>("123").unwrap(), 123);
        assert_eq!(parse::<i32>("-123").unwrap(), -123);
        assert_eq!(parse::<i32>("+123").unwrap(), 123);
        assert!(parse::<i32>("1.2").is_err());
        assert!(parse::<i32>("abc").is_err());
        assert!(parse::<i32>("2147483648").is_err());
        assert_eq!(format(&-123), "-123");
    }

    #[test]
    fn double_forms() {
        assert_eq!(parse::<f64>("123").unwrap(), 123.0);
        assert_eq!(parse::<f64>("-123.45").unwrap(), -123.45);
        assert_eq!(parse::<f64>("+1e-3").unwrap(), 0.001);
        assert!(parse::<f64>("1.2.3").is_err());
        assert!(parse::<f64>("abc").is_err());
        assert!(parse::<f64>(OUT_OF_RANGE).is_err());
        assert!(parse::<f64>("inf").is_err());
        assert_eq!(format(&0.001), "0.001");
        assert_eq!(format(&-123.45), "-123.45");
        assert_eq!(format(&1.0), "1");
        assert_eq!(format(&-0.0), "0");
    }

    #[test]
    fn string_and_path_forms() {
        assert_eq!(parse::<String>("  foobar   ").unwrap(), "foobar");
        assert_eq!(format(&"  foobar  ".to_string()), "  foobar  ");

        assert_eq!(
            parse::<PathBuf>("/path/not/valid/../../to/file.ext").unwrap(),
            PathBuf::from("/path/to/file.ext")
        );
        assert_eq!(
            parse::<PathBuf>("./relative/../file.ext").unwrap(),
            PathBuf::from("file.ext")
        );
        assert_eq!(parse::<PathBuf>("../up").unwrap(), PathBuf::from("../up"));
    }

    #[test]
    fn ratio_forms() {
        assert!(approx(&[parse::<Ratio>("0.1234").unwrap().0], &[0.1234]));
        assert!(approx(&[parse::<Ratio>("12.34%").unwrap().0], &[0.1234]));
        assert_eq!(parse::<Ratio>("1/2").unwrap(), Ratio(0.5));
        assert_eq!(parse::<Ratio>("1:2").unwrap(), Ratio(0.5));
        assert_eq!(parse::<Ratio>("-2/-3.5").unwrap(), Ratio(2.0 / 3.5));
        assert!(parse::<Ratio>("12.34&").is_err());
        assert!(parse::<Ratio>("1/2/3").is_err());
        assert!(parse::<Ratio>("1/0").is_err());
        assert!(parse::<Ratio>(OUT_OF_RANGE).is_err());
        assert_eq!(format(&Ratio(0.1234)), "0.1234");
    }

    #[test]
    fn vector_forms() {
        assert_eq!(parse::<Vec<i32>>("1, 2, 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(format(&vec![1, 2, 3]), "1,2,3");
        assert_eq!(
            parse::<Vec<f64>>("  0.1,  0.2 , 0.3 ").unwrap(),
            vec![0.1, 0.2, 0.3]
        );
        assert_eq!(
            parse::<Vec<String>>("  foo, bar ,   baz ").unwrap(),
            vec!["foo", "bar", "baz"]
        );
        assert_eq!(format(&vec!["foo".to_string(), "bar".to_string()]), "foo,bar");
        assert!(parse::<Vec<i32>>("").unwrap().is_empty());
        assert!(parse::<Vec<i32>>("1,x").is_err());
    }

    #[test]
    fn color_forms() {
        let byte = |v: f64| v / 255.0;
        assert_eq!(parse::<Color>("0.1,0.2,0.3").unwrap(), Color([0.1, 0.2, 0.3]));
        assert_eq!(parse::<Color>("#FFFFFF").unwrap(), Color([1.0, 1.0, 1.0]));
        assert_eq!(
            parse::<Color>("  #1a2B3c ").unwrap(),
            Color([byte(26.0), byte(43.0), byte(60.0)])
        );
        assert_eq!(
            parse::<Color>("#123").unwrap(),
            Color([byte(17.0), byte(34.0), byte(51.0)])
        );
        assert_eq!(
            parse::<Color>("  RGB( 255 ,  255 ,255 )  ").unwrap(),
            Color([1.0, 1.0, 1.0])
        );
        assert_eq!(
            parse::<Color>("rgb(35,149,39)").unwrap(),
            Color([byte(35.0), byte(149.0), byte(39.0)])
        );
        assert!(approx(&parse::<Color>("hsv(0,0%,75%)").unwrap().0, &[0.75; 3]));
        assert!(approx(
            &parse::<Color>(" HSV( 240 , 100 % , 100 % )").unwrap().0,
            &[0.0, 0.0, 1.0]
        ));
        assert!(approx(
            &parse::<Color>("hsl( 240 , 100 % , 50 % )").unwrap().0,
            &[0.0, 0.0, 1.0]
        ));
        assert!(approx(&parse::<Color>("hwb(240,0%,0%)").unwrap().0, &[0.0, 0.0, 1.0]));
        assert!(approx(
            &parse::<Color>("cmyk(100,100%,0,0)").unwrap().0,
            &[0.0, 0.0, 1.0]
        ));
        assert_eq!(parse::<Color>("red").unwrap(), Color([1.0, 0.0, 0.0]));

        for bad in [
            "rgb(300,255,255)",
            "hsl(361,120,255)",
            "hsv(100,120%,0)",
            "hxb(240,0%,0%)",
            "cmyk(200%,12%,34%,56%)",
            "0.1,0.2,0.3,0.4",
            "#12345",
        ] {
            assert!(parse::<Color>(bad).is_err(), "{bad}");
        }

        assert_eq!(format(&Color([1.0, 0.0, 1.0])), "#ff00ff");
        assert_eq!(format(&Color([0.1, 0.2, 0.3])), "0.1,0.2,0.3");
        assert_eq!(format(&Color([0.0, 0.0, 0.0])), "#000000");
        assert_eq!(
            format(&Color([byte(171.0), byte(205.0), byte(239.0)])),
            "#abcdef"
        );
    }

    #[test]
    fn direction_forms() {
        for (text, expected) in [
            ("+X", [1.0, 0.0, 0.0]),
            ("-Y", [0.0, -1.0, 0.0]),
            ("+Z", [0.0, 0.0, 1.0]),
            ("+xZ", [1.0, 0.0, 1.0]),
            ("-XZ", [-1.0, 0.0, -1.0]),
            ("-X+Z", [-1.0, 0.0, 1.0]),
            ("-Xy+Z", [-1.0, -1.0, 1.0]),
            ("-x+Y-Z", [-1.0, 1.0, -1.0]),
            ("  0.1,  0.2 , 0.3 ", [0.1, 0.2, 0.3]),
        ] {
            assert_eq!(parse::<Direction>(text).unwrap(), Direction(expected), "{text}");
        }
        for bad in ["-K", "-y+zx", "-x++yz", "+", "0.1,0.2,0.3,0.4"] {
            assert!(parse::<Direction>(bad).is_err(), "{bad}");
        }

        for (value, expected) in [
            ([0.1, 0.2, 0.3], "0.1,0.2,0.3"),
            ([0.0, 0.0, 0.0], "0,0,0"),
            ([1.0, 0.0, 0.0], "+X"),
            ([0.0, 2.0, 0.0], "+Y"),
            ([0.0, 0.0, -3.0], "-Z"),
            ([1.0, 0.0, 1.0], "+XZ"),
            ([0.0, 2.0, -2.0], "+Y-Z"),
            ([-0.1, -0.1, 0.1], "-XY+Z"),
            ([0.1, -0.1, 0.2], "0.1,-0.1,0.2"),
        ] {
            assert_eq!(format(&Direction(value)), expected);
        }
    }

    #[test]
    fn colormap_forms() {
        assert_eq!(
            parse::<Colormap>("0,0,0,0,1,1,1,1").unwrap(),
            Colormap(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0])
        );
        assert_eq!(
            parse::<Colormap>("  -0.0,   0,   0   , 0.0,1,1.0  ,1,  1.0 ").unwrap(),
            Colormap(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0])
        );
        let parsed = parse::<Colormap>("0,#ff00ff,.2,#abcdef,0.8,#0000ff").unwrap();
        assert!(approx(
            &parsed.0,
            &[
                0.0,
                1.0,
                0.0,
                1.0,
                0.2,
                171.0 / 255.0,
                205.0 / 255.0,
                239.0 / 255.0,
                0.8,
                0.0,
                0.0,
                1.0
            ]
        ));
        assert_eq!(parsed.stops(), 3);

        for bad in [
            "zero,0,0,0,one,1,1,1",
            "-1,0,0,0,1,1,1,1",
            "0,0,0,0,2,1,1,1",
            "0,0,0,0,1,1,1",
            "0,0,0,0,1",
            "0,0,0,0,1,1,1,invalid",
        ] {
            assert!(parse::<Colormap>(bad).is_err(), "{bad}");
        }

        assert_eq!(
            format(&Colormap(vec![
                0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 1.0, 1.0, 0.9, 1.0, 1.0, 0.0
            ])),
            "0,#000000,0.5,#00ffff,0.9,#ffff00"
        );
        assert_eq!(format(&Colormap(Vec::new())), "");
        assert_eq!(parse::<Colormap>("").unwrap(), Colormap(Vec::new()));
        assert_eq!(parse::<Colormap>("  ").unwrap(), Colormap(Vec::new()));
        assert_eq!(
            format(&Colormap(vec![0.0, 0.1, 0.2, 0.3, 1.0, 0.3, 0.2, 0.1])),
            "0,0.1,0.2,0.3,1,0.3,0.2,0.1"
        );
    }

    #[test]
    fn transform_forms() {
        assert_eq!(
            parse::<Transform2d>("1,0,0,0,-1,0,0,0,1").unwrap(),
            Transform2d([1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(
            parse::<Transform2d>("scale:0.1").unwrap(),
            Transform2d([0.1, 0.0, 0.0, 0.0, 0.1, 0.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(
            parse::<Transform2d>("scale:0.1,0.2").unwrap(),
            Transform2d([0.1, 0.0, 0.0, 0.0, 0.2, 0.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(
            parse::<Transform2d>("translation:0.51,2.1").unwrap(),
            Transform2d([1.0, 0.0, 0.51, 0.0, 1.0, 2.1, 0.0, 0.0, 1.0])
        );
        let rad = 60.0_f64.to_radians();
        assert!(approx(
            &parse::<Transform2d>("scale:0.1;translation:0.51,2.1;angle:60.0")
                .unwrap()
                .0,
            &[
                0.1 * rad.cos(),
                -0.1 * rad.sin(),
                0.51,
                0.1 * rad.sin(),
                0.1 * rad.cos(),
                2.1,
                0.0,
                0.0,
                1.0
            ]
        ));

        for bad in [
            "1",
            "1,2,3,4,5,6,7,8,9,0",
            "1,2,three,4,5,6,7,8,9",
            "rotation:45.0",
            "scale:2;rotation:45.0",
            "scale:",
            "scale:,angle:0.5",
            "scale:1,2,3",
            "translation:",
            "translation:0.5",
            "translation:1,2,3",
            "angle:",
            "angle:30.0,45.0,60.0",
            "scale:1,2;scale:3,4",
            "translation:1,2;translation:3,4",
            "angle:30.0;angle:60.0",
            "scale:0.1,translation:0.51,2.1,angle:60.0",
        ] {
            assert!(parse::<Transform2d>(bad).is_err(), "{bad}");
        }

        assert_eq!(
            format(&Transform2d([0.5, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.5])),
            "0.5,0,0,0,0.5,0,0,0,0.5"
        );
        assert_eq!(
            format(&Transform2d([f64::NAN; 9])),
            "1,0,0,0,1,0,0,0,1"
        );
    }

    #[test]
    fn kinds_parse_into_matching_values() {
        let value = OptionKind::Direction.parse("+Z").unwrap();
        assert_eq!(value.kind(), OptionKind::Direction);
        assert_eq!(value.to_string(), "+Z");
        assert!(OptionKind::Int.parse("x").is_err());
    }
}
