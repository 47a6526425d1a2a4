use doc_diff::{
    Bitmap, CompareConfig, PixelBuffer, Rgba, compare_page_bitmaps, diff_page_pair,
    pixel_difference_percentage,
};

const BLACK: Rgba = Rgba {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

#[test]
fn identical_bitmaps_have_no_visual_difference() {
    let page = Bitmap::filled(8, 8, Rgba::WHITE);
    let config = CompareConfig::default();
    let result = diff_page_pair(1, Some(&page), Some(&page), &config);
    assert_eq!(result.difference_percentage, 0.0);
    assert!(!result.has_differences);

    let overlay = result.overlay.expect("overlay is built for present pairs");
    assert_eq!(overlay.get(0, 0), Rgba::WHITE);
}

#[test]
fn black_versus_white_is_fully_different() {
    let black = Bitmap::filled(8, 8, BLACK);
    let white = Bitmap::filled(8, 8, Rgba::WHITE);
    let config = CompareConfig::default();
    let result = diff_page_pair(1, Some(&black), Some(&white), &config);
    assert_eq!(result.difference_percentage, 100.0);
    assert!(result.has_differences);

    let overlay = result.overlay.expect("overlay");
    assert_eq!(overlay.get(0, 0), Rgba::MARKER);
    assert_eq!(overlay.get(7, 7), Rgba::MARKER);
}

#[test]
fn threshold_boundary_is_exclusive() {
    let base = Bitmap::filled(1, 1, BLACK);
    let at_threshold = Bitmap::filled(
        1,
        1,
        Rgba {
            r: 10,
            g: 10,
            b: 10,
            a: 255,
        },
    );
    let over_threshold = Bitmap::filled(
        1,
        1,
        Rgba {
            r: 10,
            g: 10,
            b: 11,
            a: 255,
        },
    );
    // Summed channel distance of exactly 30 is not a difference; 31 is.
    assert_eq!(pixel_difference_percentage(&base, &at_threshold, 30), 0.0);
    assert_eq!(
        pixel_difference_percentage(&base, &over_threshold, 30),
        100.0
    );
}

#[test]
fn missing_side_scores_full_and_keeps_the_present_bitmap() {
    let page = Bitmap::filled(4, 4, BLACK);
    let config = CompareConfig::default();
    let result = diff_page_pair(3, Some(&page), None, &config);
    assert_eq!(result.page_number, 3);
    assert_eq!(result.difference_percentage, 100.0);
    assert!(result.has_differences);
    assert_eq!(result.overlay, Some(page));
}

#[test]
fn both_sides_missing_is_a_clean_page() {
    let config = CompareConfig::default();
    let result = diff_page_pair(2, None, None, &config);
    assert_eq!(result.difference_percentage, 0.0);
    assert!(!result.has_differences);
    assert!(result.overlay.is_none());
}

#[test]
fn size_mismatch_scores_over_the_overlap_only() {
    // A 2x2 black page against a 4x2 black page: the overlap agrees.
    let small = Bitmap::filled(2, 2, BLACK);
    let wide = Bitmap::filled(4, 2, BLACK);
    let config = CompareConfig::default();
    let result = diff_page_pair(1, Some(&small), Some(&wide), &config);
    assert_eq!(result.difference_percentage, 0.0);

    // The overlay spans the maximum extent: A's pixels at the origin, white
    // where neither the marker nor A reaches.
    let overlay = result.overlay.expect("overlay");
    assert_eq!(overlay.width(), 4);
    assert_eq!(overlay.height(), 2);
    assert_eq!(overlay.get(0, 0), BLACK);
    assert_eq!(overlay.get(3, 0), Rgba::WHITE);
}

#[test]
fn overlay_marks_only_differing_pixels() {
    let mut a = Bitmap::filled(3, 1, Rgba::WHITE);
    let b = Bitmap::filled(3, 1, Rgba::WHITE);
    a.set(1, 0, BLACK);
    let config = CompareConfig::default();
    let result = diff_page_pair(1, Some(&a), Some(&b), &config);

    let overlay = result.overlay.expect("overlay");
    assert_eq!(overlay.get(0, 0), Rgba::WHITE);
    assert_eq!(overlay.get(1, 0), Rgba::MARKER);
    assert_eq!(overlay.get(2, 0), Rgba::WHITE);
    assert!((result.difference_percentage - 100.0 / 3.0).abs() < 1e-9);
    assert!(result.has_differences);
}

#[test]
fn page_sets_produce_results_for_every_present_index() {
    let config = CompareConfig::default();
    let a = vec![Some(Bitmap::filled(2, 2, BLACK)), None];
    let b = vec![
        Some(Bitmap::filled(2, 2, BLACK)),
        Some(Bitmap::filled(2, 2, Rgba::WHITE)),
        Some(Bitmap::filled(2, 2, Rgba::WHITE)),
    ];
    let results = compare_page_bitmaps(&a, &b, &config);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].page_number, 1);
    assert!(!results[0].has_differences);
    // Page 2 failed to rasterize on side A; page 3 exists only in B.
    assert_eq!(results[1].difference_percentage, 100.0);
    assert_eq!(results[2].difference_percentage, 100.0);
    assert!(results[2].has_differences);
}

#[test]
fn visual_threshold_gates_has_differences() {
    // One differing pixel out of 10,000 is 0.01%, below the 0.1% threshold.
    let mut a = Bitmap::filled(100, 100, Rgba::WHITE);
    let b = Bitmap::filled(100, 100, Rgba::WHITE);
    a.set(50, 50, BLACK);
    let config = CompareConfig::default();
    let result = diff_page_pair(1, Some(&a), Some(&b), &config);
    assert!(result.difference_percentage > 0.0);
    assert!(!result.has_differences);
}
