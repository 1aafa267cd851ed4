//! Painter's-algorithm scene composition.
//!
//! Interleaves wall-ray strips and billboard markers back-to-front so the
//! renderer needs no depth buffer: everything farther than a marker is
//! emitted before it, everything nearer after it.

use glam::Vec2;

use crate::engine::raycast::Ray;
use crate::sim::Marker;

/// One renderer-facing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// A maximal run of rays with consecutive fan indices, drawn as one
    /// continuous wall strip. Splitting at index gaps keeps texture
    /// interpolation from bleeding across an occlusion boundary.
    WallStrip(Vec<Ray>),
    /// A single billboard.
    Billboard(Marker),
}

/// Order one frame's rays and markers for occlusion-correct playback.
///
/// Markers are processed farthest-to-nearest; before each marker is emitted,
/// every still-unrendered ray strictly farther away goes out first (grouped
/// into index runs). Rays surviving all markers are nearer than everything
/// and close the sequence.
pub fn order(player_pos: Vec2, fan: Vec<Ray>, markers: &[Marker]) -> Vec<DrawInstruction> {
    let mut out = Vec::new();

    let mut pending: Vec<Marker> = markers.to_vec();
    pending.sort_by(|a, b| {
        let da = (a.pos - player_pos).length();
        let db = (b.pos - player_pos).length();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut unrendered = fan;

    while let Some(marker) = pending.pop() {
        let marker_dist = (marker.pos - player_pos).length();

        let (further, closer): (Vec<Ray>, Vec<Ray>) = unrendered
            .into_iter()
            .partition(|ray| ray.pos.length() > marker_dist);

        for run in group_runs(further) {
            out.push(DrawInstruction::WallStrip(run));
        }
        out.push(DrawInstruction::Billboard(marker));

        unrendered = closer;
    }

    for run in group_runs(unrendered) {
        out.push(DrawInstruction::WallStrip(run));
    }

    out
}

/// Split `rays` into maximal runs of consecutive fan indices, preserving
/// order. The input is already index-sorted because partitioning keeps the
/// fan's relative order.
fn group_runs(rays: Vec<Ray>) -> Vec<Vec<Ray>> {
    let mut runs: Vec<Vec<Ray>> = Vec::new();

    for ray in rays {
        match runs.last_mut() {
            Some(run) if run.last().map(|r| r.index + 1) == Some(ray.index) => run.push(ray),
            _ => runs.push(vec![ray]),
        }
    }

    runs
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
