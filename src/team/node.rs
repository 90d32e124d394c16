//! Character / team / army hierarchy
//!
//! Aggregates (power level, member count) are recomputed from the children
//! on every call. Insertion checks run before anything is touched, so a
//! rejected `add` leaves the composite exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::character::SharedCharacter;
use crate::core::config::GameSettings;
use crate::core::error::StructuralError;
use crate::core::types::NodeId;
use crate::team::observer::{TeamEvent, TeamObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeKind {
    Team,
    Army,
}

impl CompositeKind {
    /// Maximum number of direct children under the given limits
    pub fn capacity(self, settings: &GameSettings) -> usize {
        match self {
            CompositeKind::Team => settings.max_characters_per_team,
            CompositeKind::Army => settings.max_teams_per_army,
        }
    }
}

/// Node kind as shown in outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Character,
    Team,
    Army,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Character => write!(f, "Character"),
            NodeKind::Team => write!(f, "Team"),
            NodeKind::Army => write!(f, "Army"),
        }
    }
}

/// A single character in a hierarchy
#[derive(Debug, Clone)]
pub struct CharacterLeaf {
    id: NodeId,
    character: SharedCharacter,
}

impl CharacterLeaf {
    pub fn new(character: SharedCharacter) -> Self {
        Self {
            id: NodeId::new(),
            character,
        }
    }

    pub fn character(&self) -> &SharedCharacter {
        &self.character
    }
}

/// A team or army of child nodes
#[derive(Clone)]
pub struct TeamComposite {
    id: NodeId,
    name: String,
    kind: CompositeKind,
    children: Vec<TeamNode>,
    observers: Vec<Rc<dyn TeamObserver>>,
}

impl fmt::Debug for TeamComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamComposite")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TeamComposite {
    pub fn new(name: impl Into<String>, kind: CompositeKind) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            kind,
            children: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    pub fn children(&self) -> &[TeamNode] {
        &self.children
    }

    pub fn subscribe(&mut self, observer: Rc<dyn TeamObserver>) {
        self.observers.push(observer);
    }

    /// Drop a subscription. Returns false if the observer was not subscribed.
    pub fn unsubscribe(&mut self, observer: &Rc<dyn TeamObserver>) -> bool {
        let target = Rc::as_ptr(observer).cast::<()>();
        let before = self.observers.len();
        self.observers.retain(|o| Rc::as_ptr(o).cast::<()>() != target);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver an event to every subscribed observer
    pub fn notify(&self, event: &TeamEvent) {
        for observer in &self.observers {
            observer.receive(self, event);
        }
    }

    pub fn add(&mut self, child: TeamNode, settings: &GameSettings) -> Result<(), StructuralError> {
        let child_name = child.name();

        if self.children.iter().any(|c| c.same_member(&child)) {
            return Err(StructuralError::DuplicateMember {
                member: child_name,
                team: self.name.clone(),
            });
        }

        if self
            .children
            .iter()
            .any(|c| c.name().trim().eq_ignore_ascii_case(child_name.trim()))
        {
            return Err(StructuralError::NameCollision {
                member: child_name,
                team: self.name.clone(),
            });
        }

        let capacity = self.kind.capacity(settings);
        if self.children.len() >= capacity {
            return Err(StructuralError::CapacityExceeded {
                team: self.name.clone(),
                capacity,
            });
        }

        self.children.push(child);
        debug!(team = %self.name, member = %child_name, "Member added");
        self.notify(&TeamEvent::MemberAdded { member: child_name });
        Ok(())
    }

    /// Remove a direct child. Returns false when it was not present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(index) = self.children.iter().position(|c| c.id() == id) else {
            return false;
        };
        let removed = self.children.remove(index);
        let member = removed.name();
        debug!(team = %self.name, member = %member, "Member removed");
        self.notify(&TeamEvent::MemberRemoved { member });
        true
    }

    pub fn power_level(&self) -> i32 {
        self.children.iter().map(TeamNode::power_level).sum()
    }

    pub fn member_count(&self) -> usize {
        self.children.iter().map(TeamNode::member_count).sum()
    }
}

#[derive(Debug, Clone)]
pub enum TeamNode {
    Leaf(CharacterLeaf),
    Composite(TeamComposite),
}

impl From<CharacterLeaf> for TeamNode {
    fn from(leaf: CharacterLeaf) -> Self {
        TeamNode::Leaf(leaf)
    }
}

impl From<TeamComposite> for TeamNode {
    fn from(composite: TeamComposite) -> Self {
        TeamNode::Composite(composite)
    }
}

/// One line of a hierarchy outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineLine {
    pub depth: usize,
    pub kind: NodeKind,
    pub name: String,
    pub power: i32,
    pub members: usize,
}

impl fmt::Display for OutlineLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:indent$}{} {} (power {}, members {})",
            "",
            self.kind,
            self.name,
            self.power,
            self.members,
            indent = self.depth * 2
        )
    }
}

impl TeamNode {
    pub fn character(character: SharedCharacter) -> Self {
        TeamNode::Leaf(CharacterLeaf::new(character))
    }

    pub fn team(name: impl Into<String>) -> Self {
        TeamNode::Composite(TeamComposite::new(name, CompositeKind::Team))
    }

    pub fn army(name: impl Into<String>) -> Self {
        TeamNode::Composite(TeamComposite::new(name, CompositeKind::Army))
    }

    pub fn id(&self) -> NodeId {
        match self {
            TeamNode::Leaf(leaf) => leaf.id,
            TeamNode::Composite(composite) => composite.id,
        }
    }

    pub fn name(&self) -> String {
        match self {
            TeamNode::Leaf(leaf) => leaf.character.borrow().name().to_string(),
            TeamNode::Composite(composite) => composite.name.clone(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TeamNode::Leaf(_) => NodeKind::Character,
            TeamNode::Composite(c) => match c.kind {
                CompositeKind::Team => NodeKind::Team,
                CompositeKind::Army => NodeKind::Army,
            },
        }
    }

    pub fn power_level(&self) -> i32 {
        match self {
            TeamNode::Leaf(leaf) => leaf.character.borrow().power_level(),
            TeamNode::Composite(composite) => composite.power_level(),
        }
    }

    pub fn member_count(&self) -> usize {
        match self {
            TeamNode::Leaf(_) => 1,
            TeamNode::Composite(composite) => composite.member_count(),
        }
    }

    pub fn children(&self) -> &[TeamNode] {
        match self {
            TeamNode::Leaf(_) => &[],
            TeamNode::Composite(composite) => composite.children(),
        }
    }

    pub fn as_composite(&self) -> Option<&TeamComposite> {
        match self {
            TeamNode::Composite(composite) => Some(composite),
            TeamNode::Leaf(_) => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut TeamComposite> {
        match self {
            TeamNode::Composite(composite) => Some(composite),
            TeamNode::Leaf(_) => None,
        }
    }

    /// Same node, or two leaves wrapping the same character
    pub fn same_member(&self, other: &TeamNode) -> bool {
        if self.id() == other.id() {
            return true;
        }
        match (self, other) {
            (TeamNode::Leaf(a), TeamNode::Leaf(b)) => Rc::ptr_eq(&a.character, &b.character),
            _ => false,
        }
    }

    pub fn add(&mut self, child: TeamNode, settings: &GameSettings) -> Result<(), StructuralError> {
        match self {
            TeamNode::Leaf(leaf) => Err(StructuralError::Unsupported {
                operation: "add",
                name: leaf.character.borrow().name().to_string(),
            }),
            TeamNode::Composite(composite) => composite.add(child, settings),
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Result<bool, StructuralError> {
        match self {
            TeamNode::Leaf(leaf) => Err(StructuralError::Unsupported {
                operation: "remove",
                name: leaf.character.borrow().name().to_string(),
            }),
            TeamNode::Composite(composite) => Ok(composite.remove(id)),
        }
    }

    /// Deliver an event to observers; leaves have none
    pub fn notify(&self, event: &TeamEvent) {
        if let TeamNode::Composite(composite) = self {
            composite.notify(event);
        }
    }

    /// Every character under this node, depth first in insertion order
    pub fn characters(&self) -> Vec<SharedCharacter> {
        let mut out = Vec::new();
        self.collect_characters(&mut out);
        out
    }

    fn collect_characters(&self, out: &mut Vec<SharedCharacter>) {
        match self {
            TeamNode::Leaf(leaf) => out.push(Rc::clone(&leaf.character)),
            TeamNode::Composite(composite) => {
                for child in &composite.children {
                    child.collect_characters(out);
                }
            }
        }
    }

    /// Characters with health remaining, in traversal order
    pub fn living_characters(&self) -> Vec<SharedCharacter> {
        self.characters()
            .into_iter()
            .filter(|c| c.borrow().is_alive())
            .collect()
    }

    /// Direct child with the given name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&TeamNode> {
        self.children()
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Semantic outline of the hierarchy, one line per node
    pub fn outline(&self) -> Vec<OutlineLine> {
        let mut lines = Vec::new();
        self.collect_outline(0, &mut lines);
        lines
    }

    fn collect_outline(&self, depth: usize, lines: &mut Vec<OutlineLine>) {
        lines.push(OutlineLine {
            depth,
            kind: self.kind(),
            name: self.name(),
            power: self.power_level(),
            members: self.member_count(),
        });
        for child in self.children() {
            child.collect_outline(depth + 1, lines);
        }
    }
}
