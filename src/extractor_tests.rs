#[cfg(test)]
mod tests {
    use super::super::*;

    fn params(n_colors: usize) -> StrategyParams {
        StrategyParams {
            n_colors,
            saturation_boost: None,
            n_vibrant: None,
            seed: 42,
        }
    }

    fn grid(colors: &[[f32; 3]], width: u32) -> Vec<PixelSample> {
        colors
            .iter()
            .enumerate()
            .map(|(i, &color)| PixelSample {
                color,
                x: i as u32 % width,
                y: i as u32 / width,
            })
            .collect()
    }

    fn two_tone(n_each: usize) -> Vec<PixelSample> {
        let mut colors = vec![[0.1, 0.1, 0.1]; n_each];
        colors.extend(vec![[0.9, 0.9, 0.9]; n_each]);
        grid(&colors, 10)
    }

    #[test]
    fn test_method_parsing_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_method_parsing_rejects_unknown() {
        let result = "octree".parse::<Method>();
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_colors_rejected_for_every_method() {
        let samples = two_tone(20);
        for method in Method::ALL {
            let result = run_strategy(method, &samples, &params(0));
            assert!(
                matches!(result, Err(Error::InvalidParameter(_))),
                "{} accepted n_colors = 0",
                method
            );
        }
    }

    #[test]
    fn test_empty_samples_rejected_for_every_method() {
        for method in Method::ALL {
            let result = run_strategy(method, &[], &params(3));
            assert!(
                matches!(result, Err(Error::EmptyImage)),
                "{} accepted an empty sample set",
                method
            );
        }
    }

    #[test]
    fn test_negative_boost_rejected() {
        let samples = two_tone(10);
        let mut p = params(2);
        p.saturation_boost = Some(-1.0);
        let result = run_strategy(Method::Aggressive, &samples, &p);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_kmeans_finds_both_tones() {
        let samples = two_tone(50);
        let candidates = run_strategy(Method::Kmeans, &samples, &params(2)).unwrap();
        assert_eq!(candidates.len(), 2);
        let mut reds: Vec<u8> = candidates.iter().map(|c| c.rgb.r).collect();
        reds.sort_unstable();
        assert!(reds[0] < 60);
        assert!(reds[1] > 200);
    }

    #[test]
    fn test_fewer_distinct_colors_than_k_returns_fewer() {
        let samples = two_tone(10);
        for method in [Method::Kmeans, Method::Lab, Method::Aggressive] {
            let candidates = run_strategy(method, &samples, &params(6)).unwrap();
            assert!(
                candidates.len() <= 2,
                "{} fabricated candidates for a two-color image",
                method
            );
        }
    }

    #[test]
    fn test_lab_solid_color_converts_back() {
        let colors = vec![[0.4, 0.6, 0.8]; 64];
        let samples = grid(&colors, 8);
        let candidates = run_strategy(Method::Lab, &samples, &params(1)).unwrap();
        assert_eq!(candidates.len(), 1);
        let c = candidates[0].rgb;
        // LAB round trip stays within 2 levels per channel.
        assert!((c.r as i32 - 102).abs() <= 2);
        assert!((c.g as i32 - 153).abs() <= 2);
        assert!((c.b as i32 - 204).abs() <= 2);
    }

    #[test]
    fn test_aggressive_favors_saturated_minority() {
        // 90% gray, 10% vivid red. Uniform k-means with k=1 averages
        // toward gray; the boosted run keeps the red dominant.
        let mut colors = vec![[0.5, 0.5, 0.5]; 90];
        colors.extend(vec![[1.0, 0.0, 0.0]; 10]);
        let samples = grid(&colors, 10);

        let plain = run_strategy(Method::Kmeans, &samples, &params(1)).unwrap();
        let boosted = run_strategy(Method::Aggressive, &samples, &params(1)).unwrap();
        let plain_redness = plain[0].rgb.r as i32 - plain[0].rgb.g as i32;
        let boosted_redness = boosted[0].rgb.r as i32 - boosted[0].rgb.g as i32;
        assert!(
            boosted_redness > plain_redness,
            "boost should pull the center toward red ({} vs {})",
            boosted_redness,
            plain_redness
        );
    }

    #[test]
    fn test_vibrant_emits_vibrant_candidates_first() {
        // Mostly gray with a saturated blue minority.
        let mut colors = vec![[0.6, 0.6, 0.6]; 75];
        colors.extend(vec![[0.0, 0.2, 1.0]; 25]);
        let samples = grid(&colors, 10);

        let mut p = params(4);
        p.n_vibrant = Some(1);
        let candidates = run_strategy(Method::Vibrant, &samples, &p).unwrap();
        assert!(!candidates.is_empty());
        // First candidate comes from the high-saturation subset.
        let first = candidates[0].rgb;
        assert!(first.b > 200, "expected a blue vibrant leader, got {:?}", first);
    }

    #[test]
    fn test_vibrant_rejects_n_vibrant_above_k() {
        let samples = two_tone(20);
        let mut p = params(3);
        p.n_vibrant = Some(4);
        let result = run_strategy(Method::Vibrant, &samples, &p);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_multistage_covers_all_samples_once() {
        // Saturated red block plus gray block: pass 1 should claim the red
        // pixels so pass 2 sees only gray.
        let mut colors = vec![[1.0, 0.0, 0.0]; 30];
        colors.extend(vec![[0.5, 0.5, 0.5]; 70]);
        let samples = grid(&colors, 10);

        let candidates = run_strategy(Method::Multistage, &samples, &params(2)).unwrap();
        assert_eq!(candidates.len(), 2);
        let total: usize = candidates.iter().map(|c| c.count).sum();
        assert_eq!(total, 100, "every sample belongs to exactly one pass");
        assert!(candidates[0].rgb.r > 200, "pass 1 leads with the saturated color");
        let gray = candidates[1].rgb;
        assert!(gray.r.abs_diff(gray.g) < 10 && gray.g.abs_diff(gray.b) < 10);
    }

    #[test]
    fn test_multistage_all_neutral_image_falls_through_to_pass_two() {
        let colors = vec![[0.2, 0.2, 0.2], [0.8, 0.8, 0.8]]
            .into_iter()
            .cycle()
            .take(40)
            .collect::<Vec<_>>();
        let samples = grid(&colors, 8);
        let candidates = run_strategy(Method::Multistage, &samples, &params(2)).unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_every_method_deterministic_under_seed() {
        let mut colors = Vec::new();
        for i in 0..120 {
            colors.push([
                (i % 11) as f32 / 10.0,
                (i % 7) as f32 / 6.0,
                (i % 5) as f32 / 4.0,
            ]);
        }
        let samples = grid(&colors, 12);
        for method in Method::ALL {
            let a = run_strategy(method, &samples, &params(4)).unwrap();
            let b = run_strategy(method, &samples, &params(4)).unwrap();
            let colors_a: Vec<_> = a.iter().map(|c| c.rgb).collect();
            let colors_b: Vec<_> = b.iter().map(|c| c.rgb).collect();
            assert_eq!(colors_a, colors_b, "{} not reproducible", method);
        }
    }

    #[test]
    fn test_candidates_carry_spatial_centroids() {
        // Black on the left half, white on the right.
        let mut colors = Vec::new();
        for _y in 0..10 {
            for x in 0..10 {
                if x < 5 {
                    colors.push([0.0, 0.0, 0.0]);
                } else {
                    colors.push([1.0, 1.0, 1.0]);
                }
            }
        }
        let samples = grid(&colors, 10);
        let candidates = run_strategy(Method::Kmeans, &samples, &params(2)).unwrap();
        assert_eq!(candidates.len(), 2);
        let dark = candidates.iter().find(|c| c.rgb.r < 60).unwrap();
        let light = candidates.iter().find(|c| c.rgb.r > 200).unwrap();
        assert!(dark.centroid_x < light.centroid_x);
    }
}
