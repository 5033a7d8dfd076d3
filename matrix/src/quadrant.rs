//! Quadrant classification and ranked ordering.
//!
//! The canvas is split at its center into four quadrants. Items exactly on a
//! midline belong to the left/top side. Within a quadrant, items are ordered
//! by pixel x, then pixel y, then id, which gives a total order that does not
//! depend on insertion order. The ranked list concatenates quadrants in the
//! fixed order BottomRight, TopRight, BottomLeft, TopLeft.

#[cfg(test)]
#[path = "quadrant_test.rs"]
mod quadrant_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::board::PriorityItem;
use crate::coords::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Quadrants in ranked-list order.
    pub const RANKED: [Quadrant; 4] = [Self::BottomRight, Self::TopRight, Self::BottomLeft, Self::TopLeft];

    /// Quadrant containing `position` on a `width × height` canvas.
    #[must_use]
    pub fn of(position: Position, width: f64, height: f64) -> Self {
        let left = position.x <= width / 2.0;
        let top = position.y <= height / 2.0;
        match (left, top) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }
}

/// Items bucketed by quadrant, each bucket already in ranked order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub top_left: Vec<PriorityItem>,
    pub top_right: Vec<PriorityItem>,
    pub bottom_left: Vec<PriorityItem>,
    pub bottom_right: Vec<PriorityItem>,
}

impl Classification {
    #[must_use]
    pub fn get(&self, quadrant: Quadrant) -> &[PriorityItem] {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut Vec<PriorityItem> {
        match quadrant {
            Quadrant::TopLeft => &mut self.top_left,
            Quadrant::TopRight => &mut self.top_right,
            Quadrant::BottomLeft => &mut self.bottom_left,
            Quadrant::BottomRight => &mut self.bottom_right,
        }
    }

    /// Items in ranked order, paired with their quadrant.
    pub fn ranked(&self) -> impl Iterator<Item = (Quadrant, &PriorityItem)> {
        Quadrant::RANKED
            .into_iter()
            .flat_map(move |q| self.get(q).iter().map(move |item| (q, item)))
    }

    /// Update the title of a classified item in place. Ranking ignores titles,
    /// so no bucket is re-sorted. Returns `false` for an unknown id.
    pub fn retitle(&mut self, id: &str, title: &str) -> bool {
        let found = [&mut self.top_left, &mut self.top_right, &mut self.bottom_left, &mut self.bottom_right]
            .into_iter()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|item| item.id == id);
        match found {
            Some(item) => {
                title.clone_into(&mut item.title);
                true
            }
            None => false,
        }
    }

    /// Flat list of item ids in ranked order.
    #[must_use]
    pub fn ranked_order(&self) -> Vec<String> {
        self.ranked().map(|(_, item)| item.id.clone()).collect()
    }

    /// Total number of classified items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.top_left.len() + self.top_right.len() + self.bottom_left.len() + self.bottom_right.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket `items` into quadrants and sort each bucket. Pure.
#[must_use]
pub fn classify(items: &[PriorityItem], width: f64, height: f64) -> Classification {
    let mut out = Classification::default();
    for item in items {
        out.bucket_mut(Quadrant::of(item.position, width, height))
            .push(item.clone());
    }
    for quadrant in Quadrant::RANKED {
        out.bucket_mut(quadrant).sort_by(rank_cmp);
    }
    out
}

fn rank_cmp(a: &PriorityItem, b: &PriorityItem) -> Ordering {
    a.position
        .x
        .total_cmp(&b.position.x)
        .then_with(|| a.position.y.total_cmp(&b.position.y))
        .then_with(|| a.id.cmp(&b.id))
}
