mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_pixel_patterns::{
        AnimationKind, ExternalControlSelector, IntentChannel, LayoutError, PatternConfig,
        PipelineError, PixelLayout, Preset, Scheduler, Selection, SelectionIntent, Sequence,
        SequenceEntry,
        animation::{Direction, RainbowConfig, SolidColorConfig},
        catalog::DOT_RANDOM_PONG,
        color::{BLACK, hsv, hsv2rgb, scale_video},
        parse_query,
    };

    use crate::common::{MockLed, RecordingDriver, rng};

    type TestScheduler<'a> = Scheduler<'a, RecordingDriver, fastrand::Rng, 16, 2>;

    const fn solid(hue: u8, delay_ms: u64) -> PatternConfig {
        PatternConfig::SolidColor(SolidColorConfig {
            start_hue: hue,
            end_hue: hue,
            saturation: 255,
            delay: Duration::from_millis(delay_ms),
        })
    }

    const fn rainbow(delay_ms: u64) -> PatternConfig {
        PatternConfig::Rainbow(RainbowConfig {
            direction: Direction::Down,
            delay: Duration::from_millis(delay_ms),
        })
    }

    /// Entry that is never picked by automatic mode
    const fn pinned(config: PatternConfig) -> SequenceEntry {
        SequenceEntry::new(config, Duration::from_millis(0))
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_busy_pipeline_holds_timing_flag_down() {
        let slow = [pinned(solid(0, 1000))];
        let busy = [pinned(rainbow(0))];
        let mut slow_selector = ExternalControlSelector::new();
        let mut busy_selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&slow), PixelLayout::strip(8), &mut slow_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&busy), PixelLayout::strip(8), &mut busy_selector)
            .unwrap();

        for t in 0..1500 {
            let report = scheduler.tick(at(t));
            assert!(!report.keeping_up, "tick {t}");
            assert!(!scheduler.status(1).unwrap().keeping_up, "tick {t}");
            assert_eq!(scheduler.status(0).unwrap().keeping_up, t >= 1001, "tick {t}");
        }
    }

    #[test]
    fn test_timing_flag_drives_indicator() {
        let slow = [pinned(solid(0, 1000))];
        let paced = [pinned(rainbow(2))];
        let mut slow_selector = ExternalControlSelector::new();
        let mut paced_selector = ExternalControlSelector::new();
        let mut led = MockLed::default();
        let probe = led.clone();

        let mut scheduler: TestScheduler<'_> =
            Scheduler::new(RecordingDriver::default(), rng()).with_indicator(&mut led);
        scheduler
            .add_pipeline(Sequence::new(&slow), PixelLayout::strip(8), &mut slow_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&paced), PixelLayout::strip(8), &mut paced_selector)
            .unwrap();

        for t in 0..1200 {
            let report = scheduler.tick(at(t));
            assert_eq!(report.keeping_up, t >= 1001, "tick {t}");
            assert_eq!(probe.is_lit(), !report.keeping_up, "tick {t}");
        }
    }

    #[test]
    fn test_flush_once_per_tick_when_any_pipeline_draws() {
        let first = [pinned(solid(0, 1000))];
        let second = [pinned(solid(96, 500))];
        let mut first_selector = ExternalControlSelector::new();
        let mut second_selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&first), PixelLayout::strip(8), &mut first_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&second), PixelLayout::strip(4), &mut second_selector)
            .unwrap();

        let flushed: Vec<u64> = (0..=1001)
            .filter(|&t| scheduler.tick(at(t)).flushed)
            .collect();
        assert_eq!(flushed, vec![0, 1, 501, 1001]);
        assert_eq!(scheduler.output().writes(), 4);

        let frames = scheduler.output().last().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![hsv2rgb(hsv(0, 255, 255)); 8]);
        assert_eq!(frames[1], vec![hsv2rgb(hsv(96, 255, 255)); 4]);

        // The pattern change frame is blank
        assert!(scheduler.output().frames[0].iter().flatten().all(|cell| *cell == BLACK));
    }

    #[test]
    fn test_status_reports_which_pipeline_drew() {
        let first = [pinned(solid(0, 1000))];
        let second = [pinned(solid(96, 500))];
        let mut first_selector = ExternalControlSelector::new();
        let mut second_selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&first), PixelLayout::strip(8), &mut first_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&second), PixelLayout::strip(4), &mut second_selector)
            .unwrap();

        scheduler.tick(at(0));
        assert!(scheduler.status(0).unwrap().produced);
        assert!(scheduler.status(1).unwrap().produced);

        for t in 1..=500 {
            scheduler.tick(at(t));
        }
        assert!(!scheduler.status(0).unwrap().produced);
        assert!(!scheduler.status(1).unwrap().produced);

        assert!(scheduler.tick(at(501)).flushed);
        assert!(!scheduler.status(0).unwrap().produced);
        assert!(scheduler.status(1).unwrap().produced);

        assert!(!scheduler.tick(at(502)).flushed);
        assert!(!scheduler.status(1).unwrap().produced);
    }

    #[test]
    fn test_skip_region_stays_dark() {
        let entries = [pinned(solid(0, 1000))];
        let mut selector = ExternalControlSelector::new();
        let layout = PixelLayout::new(12, 2, 2, 1, 8)
            .unwrap()
            .with_intensity(255, 128);

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&entries), layout, &mut selector)
            .unwrap();
        scheduler.tick(at(0));
        scheduler.tick(at(1));

        let expected = scale_video(hsv2rgb(hsv(0, 255, 255)), 128);
        let pixels = scheduler.pixels(0).unwrap();
        assert_eq!(pixels.len(), 12);
        assert_eq!(&pixels[..2], &[BLACK; 2]);
        assert!(pixels[2..].iter().all(|cell| *cell == expected));
    }

    #[test]
    fn test_failed_init_leaves_pipeline_dark() {
        let entries = [
            pinned(PatternConfig::MovingDot(DOT_RANDOM_PONG)),
            pinned(solid(0, 100)),
        ];
        let mut selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&entries), PixelLayout::strip(1), &mut selector)
            .unwrap();

        let report = scheduler.tick(at(0));
        assert!(report.flushed);
        assert!(report.keeping_up);
        assert_eq!(report.next_due, None);

        let status = scheduler.status(0).unwrap();
        assert_eq!(status.active_index, 0);
        assert_eq!(status.kind, None);
        assert!(status.keeping_up);

        for t in 1..100 {
            assert!(!scheduler.tick(at(t)).flushed, "tick {t}");
        }
        assert_eq!(scheduler.pixels(0).unwrap(), &[BLACK]);

        assert!(scheduler.set_index(0, Selection::Manual(1)));
        assert!(scheduler.tick(at(100)).flushed);
        assert_eq!(scheduler.status(0).unwrap().kind, Some(AnimationKind::SolidColor));
    }

    #[test]
    fn test_unknown_and_mismatched_kinds_stay_dark() {
        let entries = [
            SequenceEntry::with_raw_kind(42, solid(0, 100), Duration::from_millis(0)),
            SequenceEntry::with_raw_kind(
                AnimationKind::Rainbow.raw(),
                solid(0, 100),
                Duration::from_millis(0),
            ),
        ];
        let mut selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&entries), PixelLayout::strip(4), &mut selector)
            .unwrap();

        scheduler.tick(at(0));
        assert_eq!(scheduler.status(0).unwrap().kind, None);

        assert!(scheduler.set_index(0, Selection::Manual(1)));
        scheduler.tick(at(1));
        let status = scheduler.status(0).unwrap();
        assert_eq!(status.active_index, 1);
        assert_eq!(status.kind, None);
        assert!(scheduler.pixels(0).unwrap().iter().all(|cell| *cell == BLACK));
    }

    #[test]
    fn test_add_pipeline_errors() {
        let entries = [pinned(solid(0, 100))];
        let mut s1 = ExternalControlSelector::new();
        let mut s2 = ExternalControlSelector::new();
        let mut s3 = ExternalControlSelector::new();
        let mut s4 = ExternalControlSelector::new();

        let mut scheduler: Scheduler<'_, RecordingDriver, fastrand::Rng, 16, 1> =
            Scheduler::new(RecordingDriver::default(), rng());
        assert_eq!(
            scheduler.add_pipeline(Sequence::new(&[]), PixelLayout::strip(4), &mut s1),
            Err(PipelineError::EmptySequence)
        );
        assert_eq!(
            scheduler.add_pipeline(Sequence::new(&entries), PixelLayout::strip(32), &mut s2),
            Err(PipelineError::Layout(LayoutError::ExceedsCapacity))
        );
        assert_eq!(
            scheduler.add_pipeline(Sequence::new(&entries), PixelLayout::strip(16), &mut s3),
            Ok(0)
        );
        assert_eq!(
            scheduler.add_pipeline(Sequence::new(&entries), PixelLayout::strip(4), &mut s4),
            Err(PipelineError::Full)
        );
        assert_eq!(scheduler.pipeline_count(), 1);
    }

    #[test]
    fn test_next_due_is_earliest_request() {
        let first = [pinned(solid(0, 1000))];
        let second = [pinned(solid(0, 300))];
        let mut first_selector = ExternalControlSelector::new();
        let mut second_selector = ExternalControlSelector::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&first), PixelLayout::strip(4), &mut first_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&second), PixelLayout::strip(4), &mut second_selector)
            .unwrap();

        assert_eq!(scheduler.tick(at(0)).next_due, Some(at(0)));
        assert_eq!(scheduler.tick(at(1)).next_due, Some(at(301)));
        assert_eq!(scheduler.tick(at(2)).next_due, Some(at(301)));
    }

    #[test]
    fn test_intents_and_presets() {
        let entries = [
            SequenceEntry::new(solid(0, 100), Duration::from_millis(1000)).named("Ember"),
            SequenceEntry::new(solid(96, 100), Duration::from_millis(1000)),
            SequenceEntry::new(solid(160, 100), Duration::from_millis(1000)).named("Ice"),
        ];
        let mut first_selector = ExternalControlSelector::new();
        let mut second_selector = ExternalControlSelector::new();
        let channel: IntentChannel<4> = IntentChannel::new();

        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&entries), PixelLayout::strip(4), &mut first_selector)
            .unwrap();
        scheduler
            .add_pipeline(Sequence::new(&entries), PixelLayout::strip(4), &mut second_selector)
            .unwrap();
        scheduler.tick(at(0));

        let sender = channel.sender();
        sender
            .try_send(SelectionIntent::Select {
                pipeline: 0,
                selection: Selection::Manual(2),
            })
            .unwrap();
        sender
            .try_send(SelectionIntent::Select {
                pipeline: 1,
                selection: Selection::Manual(5),
            })
            .unwrap();
        sender.try_send(SelectionIntent::Preset(0)).unwrap();
        assert_eq!(scheduler.process_intents(&channel.receiver()), 1);
        assert!(channel.is_empty());

        scheduler.tick(at(10));
        let status = scheduler.status(0).unwrap();
        assert_eq!(status.active_index, 2);
        assert_eq!(status.selection, Selection::Manual(2));
        assert_eq!(status.name.to_string(), "Ice");
        assert_eq!(scheduler.status(1).unwrap().selection, Selection::Automatic);

        let preset = Preset::new("evening", &[Selection::Manual(1), Selection::Automatic]);
        assert_eq!(scheduler.add_preset(preset), Some(0));
        assert!(scheduler.apply(&SelectionIntent::Preset(0)));
        scheduler.tick(at(20));
        let status = scheduler.status(0).unwrap();
        assert_eq!(status.active_index, 1);
        assert_eq!(status.name.to_string(), "Pattern 1");
        assert_eq!(scheduler.status(1).unwrap().active_index, 0);

        for intent in parse_query("?section0=255&section1=2") {
            assert!(scheduler.apply(&intent));
        }
        scheduler.tick(at(30));
        assert_eq!(scheduler.status(0).unwrap().selection, Selection::Automatic);
        assert_eq!(scheduler.status(0).unwrap().active_index, 0);
        assert_eq!(scheduler.status(1).unwrap().selection, Selection::Manual(2));

        assert!(scheduler.apply(&SelectionIntent::AllAutomatic));
        assert!(!scheduler.apply(&SelectionIntent::Select {
            pipeline: 2,
            selection: Selection::Automatic,
        }));
        scheduler.tick(at(40));
        assert_eq!(scheduler.status(1).unwrap().selection, Selection::Automatic);
        assert_eq!(scheduler.presets(), &[preset]);
    }

    #[test]
    fn test_pipelines_survive_clock_wrap() {
        let entries = [pinned(solid(0, 1000))];
        let mut selector = ExternalControlSelector::new();
        let mut scheduler: TestScheduler<'_> = Scheduler::new(RecordingDriver::default(), rng());
        scheduler
            .add_pipeline(Sequence::new(&entries), PixelLayout::strip(4), &mut selector)
            .unwrap();

        let start = u64::from(u32::MAX) - 200;
        scheduler.tick(at(start));
        assert!(scheduler.tick(at(start + 1)).flushed);
        assert!(!scheduler.tick(at(start + 1000)).flushed);
        assert!(scheduler.tick(at(start + 1001)).flushed);
        assert_eq!(scheduler.pixels(0).unwrap(), &[hsv2rgb(hsv(0, 255, 255)); 4]);
    }
}
