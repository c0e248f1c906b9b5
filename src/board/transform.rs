use crate::config::Tuning;
use crate::geometry::{EPSILON, Insets, Point, Size};

/// Scale plus translation applied on top of an item's cell placement.
/// The translation is expressed in the scaled coordinate space, i.e. it
/// is applied after the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl ItemTransform {
    pub fn identity() -> Self {
        Self::uniform(1.0)
    }

    pub fn uniform(scale: f64) -> Self {
        Self {
            scale,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.tx == 0.0 && self.ty == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityResult {
    pub transform: ItemTransform,
    /// Transform scale multiplied by the zoom scale; what the item
    /// actually occupies on screen relative to its unscaled diameter.
    pub effective_scale: f64,
}

/// Edge "focus" effect: items close to (or past) a padded viewport edge
/// shrink toward `minimum_item_scaling` and nudge back inward, reading as
/// falling off the edge.
///
/// `center` is the item's center in viewport space. Distances are
/// measured to each inset edge; an edge participates once the item is
/// closer than the activation radius, which scales with the item
/// diameter, the zoom level and the viewport size relative to the
/// reference extent.
pub fn proximity_transform(
    center: Point,
    viewport: Size,
    insets: Insets,
    zoom: f64,
    tuning: &Tuning,
) -> ProximityResult {
    let size = viewport.clamped();
    let padding = tuning.item_padding * zoom * tuning.proximity.edge_padding_factor;
    let frame_width = tuning.item_diameter * zoom;
    let radius = (tuning.item_diameter * zoom * (size.min_side() / tuning.proximity.reference_extent))
        .max(EPSILON);

    let mut distance_to_border = size.width;
    let mut x_factor = 0.0;
    let mut y_factor = 0.0;

    let left = center.x - padding - insets.left;
    if left < radius {
        distance_to_border = distance_to_border.min(left);
        x_factor = 1.0 - left / radius;
    }

    let top = center.y - padding - insets.top;
    if top < radius {
        distance_to_border = distance_to_border.min(top);
        y_factor = 1.0 - top / radius;
    }

    let right = size.width - padding - center.x - insets.right;
    if right < radius {
        distance_to_border = distance_to_border.min(right);
        x_factor = -(1.0 - right / radius);
    }

    let bottom = size.height - padding - center.y - insets.bottom;
    if bottom < radius {
        distance_to_border = distance_to_border.min(bottom);
        y_factor = -(1.0 - bottom / radius);
    }

    // Diameter-equivalent distance from here on.
    distance_to_border *= 2.0;

    if distance_to_border >= radius * 2.0 {
        return ProximityResult {
            transform: ItemTransform::identity(),
            effective_scale: zoom,
        };
    }

    if distance_to_border < -(tuning.item_diameter * tuning.proximity.clamp_cutoff_factor) {
        return ProximityResult {
            transform: ItemTransform::uniform(tuning.minimum_item_scaling),
            effective_scale: tuning.minimum_item_scaling * zoom,
        };
    }

    let raw = tuning
        .proximity
        .easing
        .apply((distance_to_border / (radius * 2.0)).clamp(0.0, 1.0));
    let scale = raw * (1.0 - tuning.minimum_item_scaling) + tuning.minimum_item_scaling;

    let x_offset = frame_width * 0.8 * (1.0 - raw) * x_factor;
    let y_offset = frame_width * 0.5 * (1.0 - raw) * y_factor;
    let translation_modifier = (distance_to_border / tuning.item_diameter
        + tuning.proximity.clamp_cutoff_factor)
        .min(1.0);

    ProximityResult {
        transform: ItemTransform {
            scale,
            tx: x_offset * translation_modifier,
            ty: y_offset * translation_modifier,
        },
        effective_scale: scale * zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_centered_item_keeps_identity() {
        let result = proximity_transform(
            Point::new(160.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            1.0,
            &tuning(),
        );
        assert!(result.transform.is_identity());
        assert_eq!(result.effective_scale, 1.0);
    }

    #[test]
    fn test_exactly_at_activation_radius_keeps_identity() {
        // Square viewport, diameter picked so the activation radius
        // equals the padded distance from the center to every edge:
        // radius = 140.8 * (320/320), distance = 160 - 48*0.4 = 140.8.
        let mut tuning = tuning();
        tuning.item_diameter = 140.8;

        let result = proximity_transform(
            Point::new(160.0, 160.0),
            Size::new(320.0, 320.0),
            Insets::default(),
            1.0,
            &tuning,
        );
        assert!(result.transform.is_identity());
    }

    #[test]
    fn test_far_past_edge_clamps_to_minimum_scaling() {
        let tuning = tuning();
        // Left distance is about -419, doubled -838, well past -2.5 * 128.
        let result = proximity_transform(
            Point::new(-400.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            1.0,
            &tuning,
        );
        assert_eq!(result.transform.scale, tuning.minimum_item_scaling);
        assert_eq!(result.transform.tx, 0.0);
        assert_eq!(result.effective_scale, tuning.minimum_item_scaling);
    }

    #[test]
    fn test_near_left_edge_shrinks_and_pushes_inward() {
        let tuning = tuning();
        let result = proximity_transform(
            Point::new(40.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            1.0,
            &tuning,
        );

        assert!(result.transform.scale < 1.0);
        assert!(result.transform.scale >= tuning.minimum_item_scaling);
        // Pushed back toward the inside, away from the left edge.
        assert!(result.transform.tx > 0.0);
        assert_eq!(result.transform.ty, 0.0);
    }

    #[test]
    fn test_scale_decreases_monotonically_toward_edge() {
        let tuning = tuning();
        let scales: Vec<f64> = [120.0, 80.0, 40.0, 10.0, -40.0]
            .iter()
            .map(|&x| {
                proximity_transform(
                    Point::new(x, 240.0),
                    Size::new(320.0, 480.0),
                    Insets::default(),
                    1.0,
                    &tuning,
                )
                .effective_scale
            })
            .collect();

        for pair in scales.windows(2) {
            assert!(pair[0] >= pair[1], "scales not monotone: {scales:?}");
        }
    }

    #[test]
    fn test_insets_shift_the_padded_edges() {
        let tuning = tuning();
        let without = proximity_transform(
            Point::new(100.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            1.0,
            &tuning,
        );
        let with = proximity_transform(
            Point::new(100.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::new(60.0, 0.0, 0.0, 0.0),
            1.0,
            &tuning,
        );
        assert!(with.effective_scale <= without.effective_scale);
    }

    #[test]
    fn test_zoom_scales_activation_radius() {
        let tuning = tuning();
        // At half zoom the same viewport position is proportionally
        // further from the edge in item-diameter terms.
        let full = proximity_transform(
            Point::new(70.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            1.0,
            &tuning,
        );
        let half = proximity_transform(
            Point::new(70.0, 240.0),
            Size::new(320.0, 480.0),
            Insets::default(),
            0.5,
            &tuning,
        );
        assert!(half.transform.scale >= full.transform.scale);
    }
}
