use crate::direction::{Direction, DirectionNormalizer, NormalizeOutcome};
use crate::host::Host;
use crate::input::{BracketMirror, ChordDetector, InputDisposition, KeyEvent};
use crate::settings::Settings;

/// Shown once per request when tables are configured to be left alone.
pub const TABLE_NOTICE: &str = "Tables are not supported when table handling is set to refuse.";

/// The handlers a host registers to get per-line direction control.
///
/// Owns the chord state between events; everything else is read from the
/// host's active document when an event arrives.
#[derive(Debug, Clone, Default)]
pub struct NativeRtl {
    settings: Settings,
    chord: ChordDetector,
}

impl NativeRtl {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            chord: ChordDetector::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) {
        self.chord.key_down(event);
    }

    /// Completes a chord and normalizes the active document if one was requested.
    pub fn on_key_up<H: Host>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
    ) -> Option<NormalizeOutcome> {
        let direction = self.chord.key_up(event)?;
        self.request_direction(host, direction)
    }

    /// Normalize the selected lines of the active document to `direction`.
    ///
    /// Also the entry point for hosts that trigger direction changes some other
    /// way than the keyboard chord.
    pub fn request_direction<H: Host>(
        &mut self,
        host: &mut H,
        direction: Direction,
    ) -> Option<NormalizeOutcome> {
        let normalizer = DirectionNormalizer::new(self.settings.table_handling);
        let outcome = normalizer.normalize(host.active_document()?, direction);
        log::debug!("normalized to {direction}: {outcome:?}");

        if outcome.tables_refused > 0 {
            host.show_transient_notice(TABLE_NOTICE, self.settings.notice_duration());
        }
        Some(outcome)
    }

    /// Single-character input; `Handled` means the host must not insert `text` itself.
    pub fn on_before_input<H: Host>(&mut self, host: &mut H, text: &str) -> InputDisposition {
        if !self.settings.mirror_brackets {
            return InputDisposition::PassThrough;
        }
        let auto_pair = host.auto_pair_enabled();
        match host.active_document() {
            Some(doc) => BracketMirror::on_insert(doc, text, auto_pair),
            None => InputDisposition::PassThrough,
        }
    }
}
