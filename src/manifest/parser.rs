//! Slice manifest parsing
//!
//! Reads the TOML manifest that lists source images and their output
//! rules, and turns it into input tasks.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::errors::{SliceError, SliceResult};
use crate::slicer::{CopyOutput, Flip, InputTask, LeftoverMark, OutputSpec, Placement,
                    RegionOutput, SheetOutput};

use super::patterns::{parse_color, parse_pair, parse_region};

/// Parsed slice manifest
#[derive(Debug, Default)]
pub struct Manifest {
    tasks: Vec<InputTask>,
}

impl Manifest {
    /// Parse a manifest from a TOML string
    pub fn from_str(content: &str) -> SliceResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(SliceError::Manifest(format!("Failed to parse TOML: {}", e))),
        };

        let inputs = match toml_value.get("input") {
            Some(value) => value.as_array().ok_or_else(|| {
                SliceError::Manifest("'input' must be an array of tables ([[input]])".to_string())
            })?,
            None => return Ok(Manifest::default()),
        };

        let mut tasks = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            tasks.push(Self::parse_input(input, index)?);
        }

        info!("Parsed manifest with {} inputs", tasks.len());
        Ok(Manifest { tasks })
    }

    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> SliceResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(SliceError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    pub fn tasks(&self) -> &[InputTask] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<InputTask> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn parse_input(input: &toml::Value, index: usize) -> SliceResult<InputTask> {
        let path = required_str(input, "path", &format!("input #{}", index))?;
        let context = format!("input '{}'", path);

        let mut outputs: Vec<Box<dyn OutputSpec>> = Vec::new();
        if let Some(list) = input.get("output") {
            let list = list.as_array().ok_or_else(|| {
                SliceError::Manifest(format!("{}: 'output' must be an array of tables", context))
            })?;
            for (output_index, output) in list.iter().enumerate() {
                let output_context = format!("{} output #{}", context, output_index);
                outputs.push(Self::parse_output(output, &output_context)?);
            }
        }

        debug!("Input {} declares {} outputs", path, outputs.len());
        Ok(InputTask::new(path).with_outputs(outputs))
    }

    fn parse_output(output: &toml::Value, context: &str) -> SliceResult<Box<dyn OutputSpec>> {
        let kind = output.get("kind").and_then(|v| v.as_str()).unwrap_or("region");
        let path = required_str(output, "path", context)?;
        let mark = parse_mark(output, context)?;

        match kind.to_lowercase().as_str() {
            "region" => {
                let region = parse_region(required_str(output, "region", context)?)
                    .map_err(|e| in_context(context, e))?;
                Ok(Box::new(RegionOutput::new(path, region).with_mark(mark)))
            },
            "copy" => Ok(Box::new(CopyOutput::new(path).with_mark(mark))),
            "sheet" => {
                let (width, height) = parse_pair(required_str(output, "size", context)?)
                    .map_err(|e| in_context(context, e))?;
                let (template_width, template_height) =
                    parse_pair(required_str(output, "template", context)?)
                        .map_err(|e| in_context(context, e))?;

                let mut sheet = SheetOutput::new(path, width, height, template_width, template_height)
                    .with_mark(mark);
                let places = output.get("place").and_then(|v| v.as_array()).ok_or_else(|| {
                    SliceError::Manifest(format!("{}: sheet needs at least one [[place]]", context))
                })?;
                for place in places {
                    sheet = sheet.place(parse_placement(place, context)?);
                }
                Ok(Box::new(sheet))
            },
            other => Err(SliceError::Manifest(format!("{}: unknown output kind '{}'", context, other))),
        }
    }
}

fn parse_placement(place: &toml::Value, context: &str) -> SliceResult<Placement> {
    let from = parse_region(required_str(place, "from", context)?)
        .map_err(|e| in_context(context, e))?;
    let (to_x, to_y) = parse_pair(required_str(place, "to", context)?)
        .map_err(|e| in_context(context, e))?;

    let flip = match place.get("flip").and_then(|v| v.as_str()) {
        Some(name) => Flip::from_name(name).ok_or_else(|| {
            SliceError::Manifest(format!("{}: unknown flip '{}'", context, name))
        })?,
        None => Flip::None,
    };

    Ok(Placement::new(from, to_x, to_y).flipped(flip))
}

fn parse_mark(output: &toml::Value, context: &str) -> SliceResult<LeftoverMark> {
    match output.get("leftover").and_then(|v| v.as_str()) {
        None => Ok(LeftoverMark::Clear),
        Some(value) if value.eq_ignore_ascii_case("clear") => Ok(LeftoverMark::Clear),
        Some(value) => parse_color(value)
            .map(LeftoverMark::Fill)
            .map_err(|e| in_context(context, e)),
    }
}

fn required_str<'v>(value: &'v toml::Value, key: &str, context: &str) -> SliceResult<&'v str> {
    value.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
        SliceError::Manifest(format!("{}: missing string field '{}'", context, key))
    })
}

fn in_context(context: &str, error: SliceError) -> SliceError {
    match error {
        SliceError::Manifest(msg) => SliceError::Manifest(format!("{}: {}", context, msg)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r##"
[[input]]
path = "sprite.png"

  [[input.output]]
  path = "parts/head.png"
  region = "0,0,2,2"

  [[input.output]]
  kind = "sheet"
  path = "sheets/body.png"
  size = "4,4"
  template = "4,4"
  leftover = "#000000"

    [[input.output.place]]
    from = "0,2,2,2"
    to = "2,2"
    flip = "vertical"

[[input]]
path = "icons/star.png"

  [[input.output]]
  kind = "copy"
  path = "star.png"

[[input]]
path = "untouched.png"
"##;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.len(), 3);

        let tasks = manifest.tasks();
        assert_eq!(tasks[0].path(), "sprite.png");
        let destinations: Vec<&str> = tasks[0].outputs().iter().map(|o| o.destination()).collect();
        assert_eq!(destinations, vec!["parts/head.png", "sheets/body.png"]);
        assert_eq!(tasks[1].outputs()[0].destination(), "star.png");
        assert!(tasks[2].outputs().is_empty());
    }

    #[test]
    fn test_empty_manifest() {
        assert!(Manifest::from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_region_names_context() {
        let err = Manifest::from_str(r#"
[[input]]
path = "a.png"
[[input.output]]
path = "b.png"
region = "1,2,3"
"#).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("input 'a.png' output #0"), "{}", message);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Manifest::from_str(r#"
[[input]]
path = "a.png"
[[input.output]]
kind = "mosaic"
path = "b.png"
"#).unwrap_err();

        assert!(err.to_string().contains("unknown output kind 'mosaic'"));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let err = Manifest::from_str("[[input]]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, SliceError::Manifest(_)));
    }

    #[test]
    fn test_sheet_without_places_is_rejected() {
        let err = Manifest::from_str(r#"
[[input]]
path = "a.png"
[[input.output]]
kind = "sheet"
path = "b.png"
size = "2,2"
template = "4,4"
"#).unwrap_err();

        assert!(err.to_string().contains("[[place]]"));
    }
}
