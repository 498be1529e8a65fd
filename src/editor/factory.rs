//! Element factory: turns add requests into fully formed elements

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::document::{Bounds, ElementId, ElementKind, FloorElement, Size};

use super::error::FactoryError;

/// Source of fresh element ids
///
/// The factory never reuses an id it has handed out; implementations must
/// not either.
pub trait IdGenerator {
    fn next_id(&mut self) -> ElementId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> ElementId {
        (**self).next_id()
    }
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

/// Ids of the form `el-{unix millis}-{7 random base-36 chars}`
///
/// Unique with overwhelming probability across a process lifetime; not
/// suitable where unguessable ids are required.
#[derive(Debug)]
pub struct TimestampIds {
    rng: StdRng,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible suffixes for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for TimestampIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> ElementId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        ElementId(format!("el-{}-{}", millis, suffix))
    }
}

/// Deterministic ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("el")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        let id = ElementId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Request to create a new element
///
/// Carries only the kind-specific intent; identity and geometry are
/// assigned by the factory.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementToAdd {
    Table {
        table_number: String,
        seats: u32,
    },
    TableGroup {
        table_numbers: Vec<String>,
        seats: u32,
    },
    Bar {
        label: Option<String>,
    },
    Zone {
        name: String,
        color: Option<String>,
    },
    Wall,
    Entrance {
        label: Option<String>,
    },
    /// A kind this editor does not know, kept by name
    Unrecognized(String),
}

impl ElementToAdd {
    pub fn kind_name(&self) -> &str {
        match self {
            ElementToAdd::Table { .. } => "table",
            ElementToAdd::TableGroup { .. } => "tableGroup",
            ElementToAdd::Bar { .. } => "bar",
            ElementToAdd::Zone { .. } => "zone",
            ElementToAdd::Wall => "wall",
            ElementToAdd::Entrance { .. } => "entrance",
            ElementToAdd::Unrecognized(kind) => kind,
        }
    }
}

/// What to do with an add request of an unknown kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKindPolicy {
    /// Build a plain wall so the editor never blocks
    #[default]
    Wall,
    /// Fail with [`FactoryError::UnsupportedElementKind`]
    Reject,
}

/// Default width and height per element kind
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementSizes {
    pub table: Size,
    pub table_group: Size,
    pub bar: Size,
    pub zone: Size,
    pub wall: Size,
    pub entrance: Size,
}

impl Default for ElementSizes {
    fn default() -> Self {
        Self {
            table: Size::new(80.0, 80.0),
            table_group: Size::new(80.0, 80.0),
            bar: Size::new(120.0, 60.0),
            zone: Size::new(200.0, 120.0),
            wall: Size::new(60.0, 20.0),
            entrance: Size::new(80.0, 40.0),
        }
    }
}

/// Builds elements with fresh ids and kind defaults
#[derive(Debug)]
pub struct ElementFactory<G> {
    ids: G,
    sizes: ElementSizes,
    unknown_kind: UnknownKindPolicy,
}

impl<G: IdGenerator> ElementFactory<G> {
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            sizes: ElementSizes::default(),
            unknown_kind: UnknownKindPolicy::default(),
        }
    }

    pub fn with_sizes(mut self, sizes: ElementSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_unknown_kind_policy(mut self, policy: UnknownKindPolicy) -> Self {
        self.unknown_kind = policy;
        self
    }

    pub fn sizes(&self) -> &ElementSizes {
        &self.sizes
    }

    /// Create an element at the origin with the kind's default size.
    ///
    /// The tenant context is accepted for API parity with the venue service
    /// and currently unused.
    pub fn create(
        &mut self,
        request: &ElementToAdd,
        _tenant_id: Option<&str>,
    ) -> Result<FloorElement, FactoryError> {
        let (kind, size) = match request {
            ElementToAdd::Table {
                table_number,
                seats,
            } => (
                ElementKind::Table {
                    table_number: table_number.clone(),
                    seats: *seats,
                    table_id: None,
                },
                self.sizes.table,
            ),
            ElementToAdd::TableGroup {
                table_numbers,
                seats,
            } => (
                ElementKind::TableGroup {
                    table_numbers: table_numbers.clone(),
                    seats: *seats,
                    table_ids: None,
                },
                self.sizes.table_group,
            ),
            ElementToAdd::Bar { label } => (
                ElementKind::Bar {
                    label: Some(label.clone().unwrap_or_else(|| "Bar".to_string())),
                },
                self.sizes.bar,
            ),
            ElementToAdd::Zone { name, color } => (
                ElementKind::Zone {
                    name: name.clone(),
                    color: color.clone(),
                },
                self.sizes.zone,
            ),
            ElementToAdd::Wall => (ElementKind::Wall, self.sizes.wall),
            ElementToAdd::Entrance { label } => (
                ElementKind::Entrance {
                    label: Some(label.clone().unwrap_or_else(|| "Entrance".to_string())),
                },
                self.sizes.entrance,
            ),
            ElementToAdd::Unrecognized(kind) => match self.unknown_kind {
                UnknownKindPolicy::Wall => {
                    tracing::warn!(kind = %kind, "unknown element kind, creating a wall instead");
                    (ElementKind::Wall, self.sizes.wall)
                }
                UnknownKindPolicy::Reject => return Err(FactoryError::unsupported(kind.as_str())),
            },
        };

        Ok(FloorElement::new(
            self.ids.next_id(),
            Bounds::new(0.0, 0.0, size.w, size.h),
            kind,
        ))
    }

    /// Copy an element under a fresh id; every other field is kept as is
    pub fn clone_element(&mut self, element: &FloorElement) -> FloorElement {
        FloorElement {
            id: self.ids.next_id(),
            ..element.clone()
        }
    }
}
