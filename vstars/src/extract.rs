//! Reduces a `raw::FacilityBundle` to `VideoMap`s.

use geom::LonLat;

use crate::{raw, Field, ParseProblem, SegmentError, VideoMap};

/// Every map in document order, including the ones with no usable lines.
pub fn extract(bundle: &raw::FacilityBundle) -> Vec<VideoMap> {
    bundle.all_maps().map(VideoMap::from_raw).collect()
}

impl VideoMap {
    pub fn from_raw(raw: &raw::VideoMap) -> VideoMap {
        let mut map = VideoMap {
            name: raw.long_name.clone(),
            group: raw.stars_group.clone(),
            points: Vec::new(),
            skipped: Vec::new(),
        };
        for element in &raw.elements {
            if !element.is_line() || element.is_placeholder() {
                continue;
            }
            match parse_line(element) {
                Ok((start, end)) => {
                    map.points.push(start);
                    map.points.push(end);
                }
                Err(err) => {
                    debug!("{}: {}", map.name, err);
                    map.skipped.push(err);
                }
            }
        }
        map
    }

    pub fn num_segments(&self) -> usize {
        self.points.len() / 2
    }
}

fn parse_line(element: &raw::Element) -> Result<(LonLat, LonLat), SegmentError> {
    let start_lat = parse_coordinate(Field::StartLat, &element.start_lat)?;
    let start_lon = parse_coordinate(Field::StartLon, &element.start_lon)?;
    let end_lat = parse_coordinate(Field::EndLat, &element.end_lat)?;
    let end_lon = parse_coordinate(Field::EndLon, &element.end_lon)?;
    Ok((
        LonLat::new(start_lon, start_lat),
        LonLat::new(end_lon, end_lat),
    ))
}

fn parse_coordinate(field: Field, input: &str) -> Result<f32, SegmentError> {
    let problem = match input.parse::<f32>() {
        // "inf" and friends are fine, but a finite literal that overflows isn't
        Ok(value) if value.is_infinite() && !spells_infinity(input) => ParseProblem::OutOfRange,
        Ok(value) => {
            return Ok(value);
        }
        Err(_) => ParseProblem::InvalidSyntax,
    };
    Err(SegmentError {
        field,
        input: input.to_string(),
        problem,
    })
}

fn spells_infinity(input: &str) -> bool {
    input
        .trim_start_matches(|c: char| c == '+' || c == '-')
        .to_ascii_lowercase()
        .starts_with("inf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start_lat: &str, start_lon: &str, end_lat: &str, end_lon: &str) -> raw::Element {
        raw::Element {
            element_type: "Line".to_string(),
            start_lat: start_lat.to_string(),
            start_lon: start_lon.to_string(),
            end_lat: end_lat.to_string(),
            end_lon: end_lon.to_string(),
        }
    }

    fn map(elements: Vec<raw::Element>) -> raw::VideoMap {
        raw::VideoMap {
            long_name: "PHL".to_string(),
            stars_group: "A".to_string(),
            elements,
        }
    }

    #[test]
    fn coordinates() {
        assert_eq!(parse_coordinate(Field::StartLat, "39.5"), Ok(39.5));
        assert_eq!(parse_coordinate(Field::StartLat, "-75"), Ok(-75.0));
        assert_eq!(parse_coordinate(Field::StartLat, "1e1"), Ok(10.0));
        assert_eq!(
            parse_coordinate(Field::StartLat, "inf"),
            Ok(f32::INFINITY)
        );

        for (input, problem) in [
            ("abc", ParseProblem::InvalidSyntax),
            ("", ParseProblem::InvalidSyntax),
            (" 1.0", ParseProblem::InvalidSyntax),
            ("1,5", ParseProblem::InvalidSyntax),
            ("0x1p-2", ParseProblem::InvalidSyntax),
            ("1e39", ParseProblem::OutOfRange),
            ("-1e39", ParseProblem::OutOfRange),
        ] {
            assert_eq!(
                parse_coordinate(Field::EndLon, input),
                Err(SegmentError {
                    field: Field::EndLon,
                    input: input.to_string(),
                    problem,
                }),
                "{}",
                input
            );
        }
    }

    #[test]
    fn lon_comes_first() {
        let result = VideoMap::from_raw(&map(vec![line("1", "2", "3", "4")]));
        assert_eq!(
            result.points,
            vec![LonLat::new(2.0, 1.0), LonLat::new(4.0, 3.0)]
        );
        assert_eq!(result.num_segments(), 1);
        assert_eq!(result.name, "PHL");
        assert_eq!(result.group, "A");
    }

    #[test]
    fn only_lines() {
        let mut arc = line("1", "2", "3", "4");
        arc.element_type = "Arc".to_string();
        let mut untyped = line("1", "2", "3", "4");
        untyped.element_type = String::new();
        let result = VideoMap::from_raw(&map(vec![arc, untyped]));
        assert!(result.points.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn placeholders() {
        let result = VideoMap::from_raw(&map(vec![
            line("0", "0", "0", "0"),
            // Only the exact text "0" counts
            line("0.0", "0", "0", "0"),
            line("0", "0", "0", "5"),
        ]));
        assert_eq!(result.num_segments(), 2);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn one_bad_segment() {
        let result = VideoMap::from_raw(&map(vec![
            line("1", "2", "3", "4"),
            line("abc", "2", "3", "4"),
            line("5", "6", "7", "8"),
        ]));
        assert_eq!(
            result.points,
            vec![
                LonLat::new(2.0, 1.0),
                LonLat::new(4.0, 3.0),
                LonLat::new(6.0, 5.0),
                LonLat::new(8.0, 7.0),
            ]
        );
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(
            result.skipped[0].to_string(),
            "parsing StartLat \"abc\": invalid syntax"
        );
    }

    #[test]
    fn first_bad_field_wins() {
        let result = VideoMap::from_raw(&map(vec![line("1", "x", "3", "y")]));
        assert_eq!(result.skipped[0].field, Field::StartLon);
        let result = VideoMap::from_raw(&map(vec![line("1", "2", "", "y")]));
        assert_eq!(result.skipped[0].field, Field::EndLat);
        assert_eq!(
            result.skipped[0].to_string(),
            "parsing EndLat \"\": invalid syntax"
        );
    }
}
