//! Mapping of source-local markers onto the project timeline

use crate::chapters::ChapterMap;
use crate::collector::MaterialPool;
use crate::marker::markers_of;
use crate::segment::Segment;
use crate::{Document, ExtractorConfig};
use std::collections::{HashMap, HashSet};

/// Finds where each qualifying marker becomes visible in the edited video.
///
/// A marker at source position `p` shows up through every segment that
/// references its material and whose source range contains `p`, at
/// `target.start + (p - source.start)`. Offsets outside `[0, duration]`
/// (when the document declares a non-zero duration), negative offsets and
/// offsets that overflow are dropped. For each label only the earliest
/// offset is kept.
pub fn map_markers(
    document: &Document,
    pool: &MaterialPool<'_>,
    config: &ExtractorConfig,
) -> ChapterMap {
    let segments = document.segments();
    let duration = document.duration();

    let mut by_material: HashMap<&str, Vec<&Segment<'_>>> = HashMap::new();
    for segment in &segments {
        if let Some(id) = segment.material_id {
            by_material.entry(id).or_default().push(segment);
        }
    }

    let mut chapters = ChapterMap::new();

    for (material_id, material) in pool.iter() {
        let markers: Vec<_> = markers_of(material)
            .into_iter()
            .filter(|m| m.has_color(&config.target_color))
            .collect();
        if markers.is_empty() {
            continue;
        }

        let candidates = candidate_segments(material_id, &by_material, &segments);
        if candidates.is_empty() {
            tracing::debug!("material {} is not used on the timeline", material_id);
            continue;
        }

        for marker in &markers {
            let Some(position) = marker.position else {
                tracing::debug!("marker '{}' has no time position, skipping", marker.label);
                continue;
            };

            for segment in &candidates {
                let Some(offset) = segment.timeline_offset(position) else {
                    continue;
                };
                if duration.is_some_and(|d| offset > d) {
                    tracing::debug!(
                        "marker '{}' maps to {} beyond project duration",
                        marker.label,
                        offset
                    );
                    continue;
                }
                let Ok(offset) = u64::try_from(offset) else {
                    continue;
                };

                tracing::trace!(
                    "marker '{}' via segment {} -> {}",
                    marker.label,
                    segment.index,
                    offset
                );
                chapters.record(&marker.label, offset);
            }
        }
    }

    chapters
}

/// Segments that reference `material_id` directly, followed by those that
/// only list it among their extra references. Each segment appears once.
fn candidate_segments<'s, 'a>(
    material_id: &str,
    by_material: &HashMap<&str, Vec<&'s Segment<'a>>>,
    segments: &'s [Segment<'a>],
) -> Vec<&'s Segment<'a>> {
    let mut candidates = by_material.get(material_id).cloned().unwrap_or_default();
    let mut seen: HashSet<usize> = candidates.iter().map(|s| s.index).collect();

    for segment in segments {
        if segment.refers_to(material_id) && seen.insert(segment.index) {
            candidates.push(segment);
        }
    }

    candidates
}
