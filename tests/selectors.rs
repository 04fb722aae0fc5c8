mod common;

mod tests {
    use embassy_time::Duration;
    use myrtio_pixel_patterns::{
        AutoShowSelector, ExternalControlSelector, PatternConfig, PatternSelector,
        PushbuttonSelector, Selection, Sequence, SequenceEntry, animation::SolidColorConfig,
        time::Millis,
    };

    use crate::common::MockButton;

    const fn entry(duration_ms: u64) -> SequenceEntry {
        SequenceEntry::new(
            PatternConfig::SolidColor(SolidColorConfig::solid(0, 255)),
            Duration::from_millis(duration_ms),
        )
    }

    const SPARSE: [SequenceEntry; 4] = [entry(0), entry(5000), entry(0), entry(3000)];
    const FOUR: [SequenceEntry; 4] = [entry(1000), entry(1000), entry(1000), entry(1000)];
    const FIVE: [SequenceEntry; 5] = [entry(1000); 5];

    fn ms(value: u32) -> Millis {
        Millis::from_ms(value)
    }

    /// Press and release the button, long enough for both edges to count
    fn click(selector: &mut PushbuttonSelector<MockButton>, button: &MockButton, at: u32) {
        button.press();
        selector.poll(ms(at));
        selector.poll(ms(at + 101));
        button.release();
        selector.poll(ms(at + 102));
        selector.poll(ms(at + 203));
    }

    #[test]
    fn test_auto_show_skips_unscheduled_entries() {
        let sequence = Sequence::new(&SPARSE);
        let mut selector = AutoShowSelector::new();
        assert!(selector.change_needed(ms(0)));

        let mut now = 0;
        let mut picked = Vec::new();
        for _ in 0..4 {
            let index = selector.change_pattern(ms(now), &sequence);
            picked.push(index);
            now += u32::try_from(SPARSE[index].duration.as_millis()).unwrap();
            assert!(!selector.change_needed(ms(now - 1)));
            assert!(selector.change_needed(ms(now)));
        }
        assert_eq!(picked, vec![1, 3, 1, 3]);
        assert_eq!(selector.selection(), Selection::Automatic);
    }

    #[test]
    fn test_auto_show_without_durations_stays_put() {
        let entries = [entry(0), entry(0)];
        let sequence = Sequence::new(&entries);
        let mut selector = AutoShowSelector::new();

        assert_eq!(selector.change_pattern(ms(0), &sequence), 0);
        assert!(!selector.change_needed(ms(1_000_000)));
        assert!(!selector.set_index(Selection::Manual(1), &sequence));
    }

    #[test]
    fn test_auto_show_survives_clock_wrap() {
        let sequence = Sequence::new(&FOUR);
        let mut selector = AutoShowSelector::new();
        let start = u32::MAX - 500;

        selector.change_pattern(ms(start), &sequence);
        assert!(!selector.change_needed(ms(start.wrapping_add(999))));
        assert!(selector.change_needed(ms(start.wrapping_add(1000))));
    }

    #[test]
    fn test_external_control_manual_selection() {
        let sequence = Sequence::new(&SPARSE);
        let mut selector = ExternalControlSelector::new();

        assert!(selector.change_needed(ms(0)));
        assert_eq!(selector.change_pattern(ms(0), &sequence), 1);
        assert!(!selector.change_needed(ms(10)));

        assert!(selector.set_index(Selection::Manual(2), &sequence));
        assert_eq!(selector.selection(), Selection::Manual(2));
        assert!(selector.change_needed(ms(10)));
        assert_eq!(selector.change_pattern(ms(10), &sequence), 2);

        // Manual entries stay until the next request
        assert!(!selector.change_needed(ms(10_000_000)));
    }

    #[test]
    fn test_external_control_rejects_out_of_range() {
        let sequence = Sequence::new(&SPARSE);
        let mut selector = ExternalControlSelector::new();
        selector.change_pattern(ms(0), &sequence);

        assert!(selector.set_index(Selection::Manual(3), &sequence));
        selector.change_pattern(ms(0), &sequence);

        assert!(!selector.set_index(Selection::Manual(4), &sequence));
        assert_eq!(selector.selection(), Selection::Manual(3));
        assert!(!selector.change_needed(ms(1)));
    }

    #[test]
    fn test_external_control_back_to_automatic() {
        let sequence = Sequence::new(&SPARSE);
        let mut selector = ExternalControlSelector::new();
        selector.set_index(Selection::Manual(0), &sequence);
        selector.change_pattern(ms(0), &sequence);

        assert!(selector.set_index(Selection::Automatic, &sequence));
        assert!(selector.change_needed(ms(100)));
        assert_eq!(selector.change_pattern(ms(100), &sequence), 1);
        assert!(!selector.change_needed(ms(5099)));
        assert!(selector.change_needed(ms(5100)));
        assert_eq!(selector.change_pattern(ms(5100), &sequence), 3);
    }

    #[test]
    fn test_pushbutton_starts_in_automatic_mode() {
        let sequence = Sequence::new(&FIVE);
        let button = MockButton::default();
        let mut selector = PushbuttonSelector::new(button.clone());
        assert_eq!(selector.selection(), Selection::Automatic);

        selector.poll(ms(0));
        assert!(selector.change_needed(ms(0)));
        assert_eq!(selector.change_pattern(ms(0), &sequence), 0);
        assert_eq!(selector.selection(), Selection::Automatic);

        assert!(!selector.change_needed(ms(999)));
        assert!(selector.change_needed(ms(1000)));
        assert_eq!(selector.change_pattern(ms(1000), &sequence), 1);
        assert!(selector.change_needed(ms(2000)));
        assert_eq!(selector.change_pattern(ms(2000), &sequence), 2);

        // A press during the show steps on from the entry on display
        click(&mut selector, &button, 2100);
        assert_eq!(selector.change_pattern(ms(2400), &sequence), 3);
        assert_eq!(selector.selection(), Selection::Manual(3));
        assert!(!selector.change_needed(ms(100_000)));
    }

    #[test]
    fn test_pushbutton_coalesces_presses() {
        let sequence = Sequence::new(&FIVE);
        let button = MockButton::default();
        let mut selector = PushbuttonSelector::new(button.clone());
        selector.change_pattern(ms(0), &sequence);

        click(&mut selector, &button, 1000);
        click(&mut selector, &button, 2000);
        click(&mut selector, &button, 3000);
        assert_eq!(selector.pending_presses(), 3);
        assert!(selector.change_needed(ms(4000)));

        assert_eq!(selector.change_pattern(ms(4000), &sequence), 3);
        assert_eq!(selector.pending_presses(), 0);
        assert_eq!(selector.selection(), Selection::Manual(3));
        assert!(!selector.change_needed(ms(4001)));
    }

    #[test]
    fn test_pushbutton_ignores_bounces() {
        let button = MockButton::default();
        let mut selector = PushbuttonSelector::new(button.clone());

        button.press();
        selector.poll(ms(0));
        selector.poll(ms(50));
        button.release();
        selector.poll(ms(60));
        selector.poll(ms(300));
        assert_eq!(selector.pending_presses(), 0);

        // Holding the button counts once
        button.press();
        for at in (400..2000).step_by(10) {
            selector.poll(ms(at));
        }
        assert_eq!(selector.pending_presses(), 1);
    }

    #[test]
    fn test_pushbutton_wraps_into_automatic() {
        let sequence = Sequence::new(&FOUR);
        let button = MockButton::default();
        let mut selector = PushbuttonSelector::new(button.clone());
        selector.change_pattern(ms(0), &sequence);

        for at in [1000, 2000, 3000] {
            click(&mut selector, &button, at);
        }
        assert_eq!(selector.change_pattern(ms(4000), &sequence), 3);

        click(&mut selector, &button, 5000);
        assert_eq!(selector.change_pattern(ms(6000), &sequence), 0);
        assert_eq!(selector.selection(), Selection::Automatic);

        assert!(!selector.change_needed(ms(6999)));
        assert!(selector.change_needed(ms(7000)));
        assert_eq!(selector.change_pattern(ms(7000), &sequence), 1);

        // A press during the show advances from the entry on display
        click(&mut selector, &button, 7100);
        assert_eq!(selector.change_pattern(ms(7400), &sequence), 2);
        assert_eq!(selector.selection(), Selection::Manual(2));
    }

    #[test]
    fn test_pushbutton_external_requests() {
        let sequence = Sequence::new(&FOUR);
        let mut selector = PushbuttonSelector::new(MockButton::default());
        selector.change_pattern(ms(0), &sequence);

        assert!(!selector.set_index(Selection::Manual(4), &sequence));
        assert!(!selector.change_needed(ms(1)));

        assert!(selector.set_index(Selection::Manual(2), &sequence));
        assert!(selector.change_needed(ms(1)));
        assert_eq!(selector.change_pattern(ms(1), &sequence), 2);

        assert!(selector.set_index(Selection::Automatic, &sequence));
        assert!(selector.change_needed(ms(2)));
        assert_eq!(selector.change_pattern(ms(2), &sequence), 0);
        assert_eq!(selector.selection(), Selection::Automatic);
    }
}
