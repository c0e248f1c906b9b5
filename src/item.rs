use crate::board::transform::ItemTransform;
use crate::geometry::Point;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identity of a springboard entry. External references use this,
/// never the grid index, since indices shift whenever the item list is
/// replaced.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemLabel(String);

impl ItemLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Opaque reference to the item's image (path, URL, icon name). The
/// engine only passes it through to the render target.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub label: ItemLabel,
    pub image: ImageRef,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            label: ItemLabel::new(label),
            image: ImageRef::new(image),
        }
    }
}

/// Engine-owned per-item layout state.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSlot {
    pub center: Point,
    pub transform: ItemTransform,
    /// Effective on-screen scale (transform scale times zoom), fed to the
    /// label-visibility threshold and the launch transition geometry.
    pub scale: f64,
    pub label_visible: bool,
}

impl Default for ItemSlot {
    fn default() -> Self {
        Self {
            center: Point::default(),
            transform: ItemTransform::identity(),
            scale: 1.0,
            label_visible: true,
        }
    }
}

/// Ordered item collection keyed by identity, with the grid index kept
/// auxiliary (`order`).
#[derive(Debug, Default)]
pub struct ItemStore {
    order: Vec<ItemId>,
    entries: HashMap<ItemId, (Item, ItemSlot)>,
}

impl ItemStore {
    /// Replaces the whole collection. Duplicate ids keep the first
    /// occurrence; slots of surviving ids are reset on the next layout
    /// pass anyway, so no diffing is attempted.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.order.clear();
        self.entries.clear();

        for item in items {
            if self.entries.contains_key(&item.id) {
                log::warn!("duplicate item id '{}' dropped", item.id);
                continue;
            }
            self.order.push(item.id.clone());
            self.entries.insert(item.id.clone(), (item, ItemSlot::default()));
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.order.iter().position(|i| i == id)
    }

    pub fn id_at(&self, index: usize) -> Option<&ItemId> {
        self.order.get(index)
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.entries.get(id).map(|(item, _)| item)
    }

    pub fn slot(&self, id: &ItemId) -> Option<&ItemSlot> {
        self.entries.get(id).map(|(_, slot)| slot)
    }

    pub fn slot_mut(&mut self, id: &ItemId) -> Option<&mut ItemSlot> {
        self.entries.get_mut(id).map(|(_, slot)| slot)
    }

    pub fn center_of(&self, id: &ItemId) -> Option<Point> {
        self.slot(id).map(|slot| slot.center)
    }

    /// Iterates in grid-placement order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item, &ItemSlot)> {
        self.order.iter().enumerate().filter_map(|(index, id)| {
            self.entries
                .get(id)
                .map(|(item, slot)| (index, item, slot))
        })
    }

    /// Index of the item whose content-space center is nearest to
    /// `point`; ties go to the lowest index. Linear scan, fine for the
    /// expected tens-to-hundreds of items.
    pub fn closest_to(&self, point: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (index, _, slot) in self.iter() {
            let distance = slot.center.distance_to(point);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }
}
