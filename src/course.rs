use anyhow::{anyhow, bail, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};

use crate::clock::DEFAULT_NEW_RECORD_DISPLAY;
use crate::pose::Pose;
use crate::respawn::DEFAULT_RESPAWN_HEIGHT;
use crate::store::DEFAULT_SAVE_FILE;
use crate::zone::{ZoneKind, ZoneShape};

/// Runtime representation of an obstacle course layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub name: String,
    pub start_pose: Pose,
    pub respawn_height: f32,
    pub new_record_display: f32,
    pub save_file: String,
    pub zones: Vec<ZoneSpec>,
}

/// Trigger volume as described in the course file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSpec {
    pub kind: ZoneKind,
    pub shape: ZoneShape,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            name: "Untitled course".to_string(),
            start_pose: Pose::IDENTITY,
            respawn_height: DEFAULT_RESPAWN_HEIGHT,
            new_record_display: DEFAULT_NEW_RECORD_DISPLAY,
            save_file: DEFAULT_SAVE_FILE.to_string(),
            zones: Vec::new(),
        }
    }
}

impl Course {
    /// Parses the course XML exported alongside the scene.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid course XML")?;
        let root = document.root_element();
        if !root.has_tag_name("course") {
            bail!("expected <course> root, found <{}>", root.tag_name().name());
        }

        let mut course = Course::default();
        if let Some(name) = optional_text(&root, "name") {
            course.name = name;
        }
        if let Some(start) = child(&root, "start") {
            let position = parse_vec3(optional_text(&start, "position"), Vec3::ZERO)
                .context("invalid start position")?;
            let rotation = parse_vec3(optional_text(&start, "rotation"), Vec3::ZERO)
                .context("invalid start rotation")?;
            course.start_pose = Pose::from_euler_degrees(position, rotation);
        }
        if let Some(respawn) = child(&root, "respawn") {
            course.respawn_height =
                parse_f32(optional_text(&respawn, "height"), course.respawn_height)
                    .context("invalid respawn height")?;
        }
        if let Some(timer) = child(&root, "timer") {
            course.new_record_display = parse_non_negative(
                optional_text(&timer, "newRecordDisplay"),
                course.new_record_display,
            )
            .context("invalid new record display time")?;
            if let Some(save_file) = optional_text(&timer, "saveFile") {
                course.save_file = save_file;
            }
        }

        for (index, node) in root
            .children()
            .filter(|n| n.has_tag_name("zone"))
            .enumerate()
        {
            let zone = parse_zone(&node).with_context(|| format!("invalid zone #{}", index + 1))?;
            course.zones.push(zone);
        }

        Ok(course)
    }

    pub fn count(&self, kind: ZoneKind) -> usize {
        self.zones.iter().filter(|zone| zone.kind == kind).count()
    }
}

fn parse_zone(node: &Node<'_, '_>) -> Result<ZoneSpec> {
    let kind = match required_text(node, "type")?.to_ascii_lowercase().as_str() {
        "start" => ZoneKind::Start,
        "finish" => ZoneKind::Finish,
        other => bail!("unknown zone type {other:?}"),
    };
    let center = parse_vec3(optional_text(node, "position"), Vec3::ZERO)?;
    let shape = match optional_text(node, "shape").as_deref().unwrap_or("box") {
        "box" => ZoneShape::Box {
            center,
            size: parse_vec3(optional_text(node, "size"), Vec3::ONE)?,
        },
        "sphere" => ZoneShape::Sphere {
            center,
            radius: parse_non_negative(optional_text(node, "radius"), 1.0)
                .context("invalid sphere radius")?,
        },
        other => bail!("unknown zone shape {other:?}"),
    };
    Ok(ZoneSpec { kind, shape })
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let components = value
        .split_whitespace()
        .map(|component| {
            parse_finite(component)
                .with_context(|| format!("invalid vector component {component:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match components[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(anyhow!(
            "vector needs 3 components, found {}",
            components.len()
        )),
    }
}

/// Parses a number, rejecting `NaN` and infinities.
fn parse_finite(text: &str) -> Result<f32> {
    let value = text
        .parse::<f32>()
        .map_err(|err| anyhow!("failed to parse float {text:?}: {err}"))?;
    if !value.is_finite() {
        bail!("{text:?} is not a finite number");
    }
    Ok(value)
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    value.as_deref().map_or(Ok(default), parse_finite)
}

fn parse_non_negative(value: Option<String>, default: f32) -> Result<f32> {
    let parsed = parse_f32(value, default)?;
    if parsed < 0.0 {
        bail!("expected a non-negative number, found {parsed}");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    <course>
        <name>Slime Climb</name>
        <start>
            <position>0 1 -2</position>
            <rotation>0 180 0</rotation>
        </start>
        <respawn>
            <height>-5</height>
        </respawn>
        <timer>
            <newRecordDisplay>4.5</newRecordDisplay>
            <saveFile>slime_times.json</saveFile>
        </timer>
        <zone>
            <type>start</type>
            <position>0 0 0</position>
            <size>6 3 1</size>
        </zone>
        <zone>
            <type>Finish</type>
            <shape>sphere</shape>
            <position>0 2 80</position>
            <radius>3</radius>
        </zone>
    </course>
    "#;

    #[test]
    fn parse_course_populates_all_sections() {
        let course = Course::from_xml(SAMPLE).unwrap();
        assert_eq!(course.name, "Slime Climb");
        assert_eq!(course.start_pose.position, Vec3::new(0.0, 1.0, -2.0));
        assert_eq!(course.respawn_height, -5.0);
        assert_eq!(course.new_record_display, 4.5);
        assert_eq!(course.save_file, "slime_times.json");
        assert_eq!(course.zones.len(), 2);
        assert_eq!(course.count(ZoneKind::Start), 1);
        assert_eq!(
            course.zones[1],
            ZoneSpec {
                kind: ZoneKind::Finish,
                shape: ZoneShape::Sphere {
                    center: Vec3::new(0.0, 2.0, 80.0),
                    radius: 3.0,
                },
            }
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let course = Course::from_xml("<course/>").unwrap();
        assert_eq!(course, Course::default());
    }

    #[test]
    fn zone_without_type_is_an_error() {
        let bad = "<course><zone><position>0 0 0</position></zone></course>";
        assert!(Course::from_xml(bad).is_err());
    }

    #[test]
    fn unknown_zone_type_is_an_error() {
        let bad = "<course><zone><type>checkpoint</type></zone></course>";
        let err = Course::from_xml(bad).unwrap_err();
        assert!(format!("{err:#}").contains("checkpoint"));
    }

    #[test]
    fn short_vector_is_an_error() {
        let bad = "<course><start><position>1 2</position></start></course>";
        assert!(Course::from_xml(bad).is_err());
    }

    #[test]
    fn non_finite_respawn_height_is_an_error() {
        for height in ["NaN", "inf", "-inf"] {
            let bad = format!("<course><respawn><height>{height}</height></respawn></course>");
            let err = Course::from_xml(&bad).unwrap_err();
            assert!(format!("{err:#}").contains("respawn height"));
        }
    }

    #[test]
    fn non_finite_vector_component_is_an_error() {
        let bad = "<course><start><position>0 NaN 0</position></start></course>";
        assert!(Course::from_xml(bad).is_err());
    }

    #[test]
    fn negative_radius_is_an_error() {
        let bad = "<course><zone><type>finish</type><shape>sphere</shape>\
                   <radius>-2</radius></zone></course>";
        let err = Course::from_xml(bad).unwrap_err();
        assert!(format!("{err:#}").contains("radius"));
    }

    #[test]
    fn negative_new_record_display_is_an_error() {
        let bad = "<course><timer><newRecordDisplay>-1</newRecordDisplay></timer></course>";
        assert!(Course::from_xml(bad).is_err());
    }

    #[test]
    fn negative_respawn_height_is_allowed() {
        let course =
            Course::from_xml("<course><respawn><height>-25.5</height></respawn></course>").unwrap();
        assert_eq!(course.respawn_height, -25.5);
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(Course::from_xml("<scene/>").is_err());
    }
}
