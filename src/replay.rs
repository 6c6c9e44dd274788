use anyhow::{anyhow, Context, Result};
use glam::Vec3;

/// One recorded frame of player movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    pub dt: f32,
    pub position: Vec3,
}

/// Parses a movement recording.
///
/// Each non-empty line holds `dt x y z`; lines starting with `#` are comments.
pub fn load_replay_from_str(data: &str) -> Result<Vec<ReplayFrame>> {
    let mut frames = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let frame = parse_frame(trimmed)
            .with_context(|| format!("invalid frame on line {}", line_no + 1))?;
        frames.push(frame);
    }
    Ok(frames)
}

fn parse_frame(line: &str) -> Result<ReplayFrame> {
    let mut parts = line.split_whitespace();
    let mut next = |what: &str| -> Result<f32> {
        parts
            .next()
            .ok_or_else(|| anyhow!("missing {what}"))?
            .parse::<f32>()
            .with_context(|| format!("{what} is not a number"))
    };
    let dt = next("delta time")?;
    let position = Vec3::new(next("x")?, next("y")?, next("z")?);
    if !dt.is_finite() || dt < 0.0 {
        return Err(anyhow!("delta time must be a non-negative number, got {dt}"));
    }
    if parts.next().is_some() {
        return Err(anyhow!("unexpected trailing values"));
    }
    Ok(ReplayFrame { dt, position })
}
