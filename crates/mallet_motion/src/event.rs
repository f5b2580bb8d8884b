//! Timed strike events.

/// A note attack as delivered by an event-sequence decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onset {
    /// Attack time in seconds
    pub time: f32,
    /// Identifier of the struck target (e.g. a note number)
    pub target: u8,
    pub velocity: u8,
}

impl Onset {
    pub fn new(time: f32, target: u8, velocity: u8) -> Self {
        Self {
            time,
            target,
            velocity,
        }
    }
}

/// One strike and the time until the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeEvent {
    /// Time of the strike in seconds
    pub time: f32,
    /// Time until the following strike
    pub duration: f32,
    pub target: u8,
    pub velocity: u8,
}

impl StrikeEvent {
    pub fn new(time: f32, duration: f32, target: u8, velocity: u8) -> Self {
        Self {
            time,
            duration,
            target,
            velocity,
        }
    }

    /// End of this event's window.
    pub fn end(&self) -> f32 {
        self.time + self.duration
    }

    /// Build strike events from onsets in chronological order.
    ///
    /// Each event lasts until the next onset; the last one lasts
    /// `tail_duration`.
    pub fn from_onsets(onsets: &[Onset], tail_duration: f32) -> Vec<StrikeEvent> {
        onsets
            .iter()
            .enumerate()
            .map(|(i, onset)| {
                let duration = onsets
                    .get(i + 1)
                    .map_or(tail_duration, |next| next.time - onset.time);
                StrikeEvent::new(onset.time, duration, onset.target, onset.velocity)
            })
            .collect()
    }
}
