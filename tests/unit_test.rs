//! Unit tests for starwatch modules

#[cfg(test)]
mod tests {
    use starwatch::config::SearchConfig;
    use starwatch::indicators::{
        calculate_ema, compute_macd, BollingerBandwidth, Ema, Indicator, MacdParams,
    };
    use starwatch::strategy::{detect, CrossSignal, CrossoverTracker};

    #[test]
    fn test_ema_indicator() {
        let mut ema = Ema::new(10);
        assert_eq!(ema.name(), "EMA");
        assert_eq!(ema.period(), 10);
        assert!(!ema.is_ready());

        // seeded from the very first value
        ema.update(100.0);
        assert!(ema.is_ready());
        assert_eq!(ema.value(), Some(100.0));

        for i in 0..20 {
            ema.update(100.0 + (i as f64 * 0.1));
        }
        assert!(ema.value().is_some());
    }

    #[test]
    fn test_ema_matches_recurrence() {
        // period 4 -> alpha = 0.4
        let values = [10.0, 20.0, 15.0];
        let out = calculate_ema(&values, 4);
        assert_eq!(out[0], 10.0);
        assert!((out[1] - 14.0).abs() < 1e-12);
        assert!((out[2] - 14.4).abs() < 1e-12);
    }

    #[test]
    fn test_macd_series_shape() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.1)).collect();
        let series = compute_macd(&closes, MacdParams::new(12, 26, 9));
        assert_eq!(series.len(), 50);
        assert!(!series.is_empty());

        // steady uptrend keeps the fast EMA above the slow one
        let last = series.point(49).unwrap();
        assert!(last.macd_line > 0.0);
        assert!((last.histogram - (last.macd_line - last.signal_line)).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_bandwidth_indicator() {
        let mut bw = BollingerBandwidth::new(20, 2.0);
        assert_eq!(bw.name(), "BollingerBandwidth");
        assert!(!bw.is_ready());

        for i in 0..25 {
            bw.update(100.0 + (i % 3) as f64);
        }
        assert!(bw.is_ready());
        let value = bw.value().unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn test_crossover_tracker_round_trip() {
        // rally then fade produces one golden and one death cross
        let closes = [10.0, 10.0, 10.0, 12.0, 14.0, 13.0, 11.0, 10.0, 10.0, 10.0];
        let mut tracker = CrossoverTracker::new(MacdParams::new(2, 4, 3));
        let signals: Vec<CrossSignal> =
            closes.iter().filter_map(|&c| tracker.update(c)).collect();
        assert_eq!(signals, vec![CrossSignal::Bullish, CrossSignal::Bearish]);
    }

    #[test]
    fn test_detect_needs_a_straddle() {
        use starwatch::indicators::MacdPoint;

        let below = MacdPoint {
            macd_line: -0.2,
            signal_line: 0.1,
            histogram: -0.3,
        };
        let above = MacdPoint {
            macd_line: 0.3,
            signal_line: 0.1,
            histogram: 0.2,
        };
        assert_eq!(detect(&below, &above), Some(CrossSignal::Bullish));
        assert_eq!(detect(&above, &below), Some(CrossSignal::Bearish));
        assert_eq!(detect(&above, &above), None);
        assert_eq!(detect(&below, &below), None);
    }

    #[test]
    fn test_search_grid_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.fast_periods, vec![5, 8, 11, 14, 17, 20]);
        assert_eq!(config.slow_periods, vec![20, 24, 28, 32, 36, 40]);
        assert_eq!(config.signal_periods, vec![5, 7, 9, 11, 13, 15]);
        assert_eq!(config.combinations(), 216);
        assert_eq!(config.success_threshold, 0.85);
        assert!(config.validate().is_ok());
    }
}
