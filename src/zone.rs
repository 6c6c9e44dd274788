use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::control::RaceController;

/// Which line of the course a trigger marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Start,
    Finish,
}

/// Trigger volume in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneShape {
    Box { center: Vec3, size: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl ZoneShape {
    pub fn contains(&self, point: Vec3) -> bool {
        match *self {
            ZoneShape::Box { center, size } => {
                let offset = (point - center).abs();
                let half = size.abs() * 0.5;
                offset.cmple(half).all()
            }
            ZoneShape::Sphere { center, radius } => {
                point.distance_squared(center) <= radius * radius
            }
        }
    }
}

/// Something that may enter a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    pub name: &'a str,
    pub tag: &'a str,
}

impl<'a> Entity<'a> {
    pub fn new(name: &'a str, tag: &'a str) -> Self {
        Self { name, tag }
    }

    pub fn is_player(&self) -> bool {
        self.tag == "Player" || self.name.contains("XR Origin")
    }
}

/// Start or finish line that reports player entry to a [`RaceController`].
#[derive(Debug, Clone)]
pub struct ZoneTrigger {
    kind: ZoneKind,
    shape: ZoneShape,
    occupied: bool,
}

impl ZoneTrigger {
    pub fn new(kind: ZoneKind, shape: ZoneShape) -> Self {
        Self {
            kind,
            shape,
            occupied: false,
        }
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ZoneKind) {
        self.kind = kind;
    }

    /// Feeds the latest entity position. Only an outside-to-inside transition
    /// of the player raises an event; staying inside does not repeat it.
    ///
    /// Returns `true` when an event was delivered.
    pub fn update<C>(&mut self, entity: Entity<'_>, position: Vec3, controller: &mut C) -> bool
    where
        C: RaceController + ?Sized,
    {
        if !entity.is_player() {
            return false;
        }
        let inside = self.shape.contains(position);
        let entered = inside && !self.occupied;
        self.occupied = inside;
        if entered {
            self.fire(controller);
        }
        entered
    }

    fn fire<C>(&self, controller: &mut C)
    where
        C: RaceController + ?Sized,
    {
        match self.kind {
            ZoneKind::Start => {
                info!("Player entered START zone");
                controller.start_zone_entered();
            }
            ZoneKind::Finish => {
                info!("Player entered FINISH zone");
                controller.finish_zone_entered();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<&'static str>,
    }

    impl RaceController for Recorder {
        fn start_zone_entered(&mut self) {
            self.events.push("start");
        }

        fn finish_zone_entered(&mut self) {
            self.events.push("finish");
        }

        fn player_fell(&mut self) {
            self.events.push("fell");
        }
    }

    const PLAYER: Entity<'static> = Entity {
        name: "XR Origin (XR Rig)",
        tag: "Untagged",
    };

    fn unit_box() -> ZoneShape {
        ZoneShape::Box {
            center: Vec3::ZERO,
            size: Vec3::splat(2.0),
        }
    }

    #[test]
    fn box_and_sphere_containment() {
        assert!(unit_box().contains(Vec3::new(1.0, -1.0, 0.5)));
        assert!(!unit_box().contains(Vec3::new(1.1, 0.0, 0.0)));
        let sphere = ZoneShape::Sphere {
            center: Vec3::new(0.0, 0.0, 10.0),
            radius: 1.0,
        };
        assert!(sphere.contains(Vec3::new(0.0, 0.5, 10.5)));
        assert!(!sphere.contains(Vec3::new(0.0, 1.0, 11.0)));
    }

    #[test]
    fn recognises_player_by_tag_or_name() {
        assert!(Entity::new("Body", "Player").is_player());
        assert!(PLAYER.is_player());
        assert!(!Entity::new("Boulder", "Obstacle").is_player());
    }

    #[test]
    fn fires_once_per_entry() {
        let mut trigger = ZoneTrigger::new(ZoneKind::Start, unit_box());
        let mut recorder = Recorder::default();
        let outside = Vec3::new(5.0, 0.0, 0.0);
        assert!(!trigger.update(PLAYER, outside, &mut recorder));
        assert!(trigger.update(PLAYER, Vec3::ZERO, &mut recorder));
        assert!(!trigger.update(PLAYER, Vec3::new(0.5, 0.0, 0.0), &mut recorder));
        trigger.update(PLAYER, outside, &mut recorder);
        assert!(trigger.update(PLAYER, Vec3::ZERO, &mut recorder));
        assert_eq!(recorder.events, ["start", "start"]);
    }

    #[test]
    fn ignores_non_player_entities() {
        let mut trigger = ZoneTrigger::new(ZoneKind::Finish, unit_box());
        let mut recorder = Recorder::default();
        let boulder = Entity::new("Boulder", "Obstacle");
        assert!(!trigger.update(boulder, Vec3::ZERO, &mut recorder));
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn kind_selects_event() {
        let mut trigger = ZoneTrigger::new(ZoneKind::Start, unit_box());
        trigger.set_kind(ZoneKind::Finish);
        assert_eq!(trigger.kind(), ZoneKind::Finish);
        let mut recorder = Recorder::default();
        trigger.update(PLAYER, Vec3::ZERO, &mut recorder);
        assert_eq!(recorder.events, ["finish"]);
    }
}
