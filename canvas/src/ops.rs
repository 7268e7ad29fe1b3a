//! Pure document mutations.
//!
//! Every function takes the current document by reference and returns the
//! next one; the input is never modified. All of them are total: an id that
//! does not name a layer yields an unchanged copy, so callers (the input
//! engine in particular) can call them speculatively without guarding.
//!
//! These functions apply regardless of a layer's `locked` flag. Refusing
//! pointer and keyboard edits to locked layers is the engine's job.

#[cfg(test)]
#[path = "ops_test.rs"]
mod ops_test;

use crate::consts::{DUPLICATE_NAME_SUFFIX, DUPLICATE_OFFSET};
use crate::doc::{DesignDocument, Layer, LayerId, PartialLayer};
use crate::geom::Rect;

/// Direction for a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the stack (painted later).
    Up,
    /// Towards the bottom of the stack (painted earlier).
    Down,
}

/// Add `layer` on top of the stack and select it.
///
/// No-op if a layer with the same id already exists or the layer's size is
/// not positive.
#[must_use]
pub fn add_layer(doc: &DesignDocument, layer: Layer) -> DesignDocument {
    if doc.contains(&layer.id) || !layer.bounds().has_positive_size() {
        return doc.clone();
    }
    let mut next = doc.clone();
    next.layer_order.push(layer.id.clone());
    next.selection = Some(layer.id.clone());
    next.layers.insert(layer.id.clone(), layer);
    next
}

/// Remove a layer from the store, the paint order and the selection.
#[must_use]
pub fn delete_layer(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    let mut next = doc.clone();
    if next.layers.remove(id).is_none() {
        return next;
    }
    next.layer_order.retain(|lid| lid != id);
    if next.selection.as_ref() == Some(id) {
        next.selection = None;
    }
    next
}

/// Duplicate a layer with the default offset. See [`duplicate_layer_by`].
#[must_use]
pub fn duplicate_layer(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    duplicate_layer_by(doc, id, DUPLICATE_OFFSET, DUPLICATE_OFFSET)
}

/// Copy a layer under a fresh id, shifted by `(dx, dy)`, directly above the
/// original in the paint order. The copy becomes the selection.
#[must_use]
pub fn duplicate_layer_by(doc: &DesignDocument, id: &LayerId, dx: f64, dy: f64) -> DesignDocument {
    let (Some(original), Some(index)) = (doc.get(id), doc.index_of(id)) else {
        return doc.clone();
    };

    let mut new_id = LayerId::generate();
    while doc.contains(&new_id) {
        new_id = LayerId::generate();
    }

    let mut copy = original.clone();
    copy.id = new_id.clone();
    copy.name = format!("{}{DUPLICATE_NAME_SUFFIX}", original.name);
    copy.set_bounds(original.bounds().offset(dx, dy));

    let mut next = doc.clone();
    next.layer_order.insert(index + 1, new_id.clone());
    next.layers.insert(new_id.clone(), copy);
    next.selection = Some(new_id);
    next
}

/// Move a layer one step up or down in the paint order, clamped at the ends.
#[must_use]
pub fn reorder_layer(doc: &DesignDocument, id: &LayerId, direction: Direction) -> DesignDocument {
    let mut next = doc.clone();
    let Some(index) = next.index_of(id) else {
        return next;
    };
    let target = match direction {
        Direction::Up if index + 1 < next.layer_order.len() => index + 1,
        Direction::Down if index > 0 => index - 1,
        _ => return next,
    };
    next.layer_order.swap(index, target);
    next
}

/// Move a layer to the top of the paint order.
#[must_use]
pub fn bring_to_front(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    let mut next = doc.clone();
    if let Some(index) = next.index_of(id) {
        let lid = next.layer_order.remove(index);
        next.layer_order.push(lid);
    }
    next
}

/// Move a layer to the bottom of the paint order.
#[must_use]
pub fn send_to_back(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    let mut next = doc.clone();
    if let Some(index) = next.index_of(id) {
        let lid = next.layer_order.remove(index);
        next.layer_order.insert(0, lid);
    }
    next
}

/// Flip a layer's `visible` flag.
#[must_use]
pub fn toggle_visibility(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    with_layer(doc, id, |layer| layer.visible = !layer.visible)
}

/// Flip a layer's `locked` flag.
#[must_use]
pub fn toggle_lock(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    with_layer(doc, id, |layer| layer.locked = !layer.locked)
}

/// Set a layer's top-left corner. Non-finite coordinates are ignored.
#[must_use]
pub fn move_layer(doc: &DesignDocument, id: &LayerId, x: f64, y: f64) -> DesignDocument {
    if !x.is_finite() || !y.is_finite() {
        return doc.clone();
    }
    with_layer(doc, id, |layer| {
        layer.x = x;
        layer.y = y;
    })
}

/// Replace a layer's bounds. Rejected unless the size is finite and positive.
#[must_use]
pub fn resize_layer(doc: &DesignDocument, id: &LayerId, bounds: Rect) -> DesignDocument {
    if !bounds.has_positive_size() || !bounds.x.is_finite() || !bounds.y.is_finite() {
        return doc.clone();
    }
    with_layer(doc, id, |layer| layer.set_bounds(bounds))
}

/// Change a layer's display name.
#[must_use]
pub fn rename_layer(doc: &DesignDocument, id: &LayerId, name: &str) -> DesignDocument {
    with_layer(doc, id, |layer| name.clone_into(&mut layer.name))
}

/// Merge a sparse update into a layer. Only fields present in `partial` are written.
#[must_use]
pub fn update_layer(doc: &DesignDocument, id: &LayerId, partial: &PartialLayer) -> DesignDocument {
    let Some(layer) = doc.get(id) else {
        return doc.clone();
    };
    let mut updated = layer.clone();
    if !updated.apply_partial(partial) {
        tracing::debug!(%id, "partial update left layer unchanged");
        return doc.clone();
    }
    let mut next = doc.clone();
    next.layers.insert(id.clone(), updated);
    next
}

/// Make `id` the single selected layer.
#[must_use]
pub fn select_layer(doc: &DesignDocument, id: &LayerId) -> DesignDocument {
    let mut next = doc.clone();
    if next.contains(id) {
        next.selection = Some(id.clone());
    }
    next
}

/// Deselect everything.
#[must_use]
pub fn clear_selection(doc: &DesignDocument) -> DesignDocument {
    let mut next = doc.clone();
    next.selection = None;
    next
}

fn with_layer(doc: &DesignDocument, id: &LayerId, edit: impl FnOnce(&mut Layer)) -> DesignDocument {
    let mut next = doc.clone();
    if let Some(layer) = next.layers.get_mut(id) {
        edit(layer);
    }
    next
}
