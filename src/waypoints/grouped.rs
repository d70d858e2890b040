use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::{WaypointPosition, Waypoints};

/// Waypoints keyed by (group, feature).
///
/// Each group comes from its own call to `project`; nothing assumes the groups
/// share the same features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedWaypoints {
    groups: Vec<(String, Waypoints)>,
}

impl GroupedWaypoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group, replacing its waypoints if the label already exists.
    pub fn insert<S: Into<String>>(&mut self, group: S, waypoints: Waypoints) {
        let group = group.into();
        match self.groups.iter_mut().find(|(label, _)| *label == group) {
            Some((_, existing)) => *existing = waypoints,
            None => self.groups.push((group, waypoints)),
        }
    }

    /// Sets a single (group, feature) position, creating the group if needed.
    pub fn insert_position<G, S>(&mut self, group: G, feature_id: S, position: WaypointPosition)
    where
        G: AsRef<str>,
        S: Into<String>,
    {
        let group = group.as_ref();
        match self.groups.iter_mut().find(|(label, _)| label == group) {
            Some((_, waypoints)) => waypoints.insert(feature_id, position),
            None => {
                let mut waypoints = Waypoints::new();
                waypoints.insert(feature_id, position);
                self.groups.push((group.to_string(), waypoints));
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<&Waypoints> {
        self.groups
            .iter()
            .find(|(label, _)| label == group)
            .map(|(_, waypoints)| waypoints)
    }

    pub fn position(&self, group: &str, feature_id: &str) -> Option<WaypointPosition> {
        self.get(group).and_then(|w| w.get(feature_id))
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Waypoints)> + '_ {
        self.groups.iter().map(|(label, w)| (label.as_str(), w))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Serialize)]
struct GroupedRecord<'a> {
    group: &'a str,
    feature_id: &'a str,
    x: f64,
    y: f64,
}

/// Serialized as a list of `{group, feature_id, x, y}` rows.
impl Serialize for GroupedWaypoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let total = self.groups.iter().map(|(_, w)| w.len()).sum();
        let mut seq = serializer.serialize_seq(Some(total))?;
        for (group, waypoints) in self.iter() {
            for (feature_id, p) in waypoints.iter() {
                seq.serialize_element(&GroupedRecord {
                    group,
                    feature_id,
                    x: p.x,
                    y: p.y,
                })?;
            }
        }
        seq.end()
    }
}
