// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/complex_event_chunk.rs
use super::complex_event::ComplexEvent;

/// Ordered, mutable sequence of events with a single active cursor.
///
/// The cursor contract lets one forward pass both inspect and selectively
/// delete events: `reset` rewinds without touching contents, `next` advances,
/// and `remove` deletes (and hands back) the event last returned by `next`.
/// Removal tombstones the slot in place, so remaining order is preserved and
/// a full inspect-and-delete pass stays O(total size).
///
/// `is_batch` is set by the producer and marks the chunk as one complete,
/// self-contained unit of work (e.g. a finalized window) rather than an
/// incremental trickle.
#[derive(Debug, Default)]
pub struct ComplexEventChunk {
    events: Vec<Option<Box<dyn ComplexEvent>>>,
    cursor: usize,
    last_returned: Option<usize>,
    live: usize,
    is_batch: bool,
}

impl ComplexEventChunk {
    pub fn new(is_batch: bool) -> Self {
        ComplexEventChunk {
            events: Vec::new(),
            cursor: 0,
            last_returned: None,
            live: 0,
            is_batch,
        }
    }

    pub fn from_events(events: Vec<Box<dyn ComplexEvent>>, is_batch: bool) -> Self {
        let mut chunk = ComplexEventChunk::new(is_batch);
        for event in events {
            chunk.add(event);
        }
        chunk
    }

    pub fn is_batch(&self) -> bool {
        self.is_batch
    }

    /// Append an event at the end of the sequence.
    pub fn add(&mut self, event: Box<dyn ComplexEvent>) {
        self.events.push(Some(event));
        self.live += 1;
    }

    /// Rewind the cursor to the first element without mutating contents.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.last_returned = None;
    }

    pub fn has_next(&self) -> bool {
        self.events[self.cursor.min(self.events.len())..]
            .iter()
            .any(Option::is_some)
    }

    /// Advance to the next live event and return a mutable view of it.
    pub fn next(&mut self) -> Option<&mut dyn ComplexEvent> {
        while self.cursor < self.events.len() {
            let idx = self.cursor;
            self.cursor += 1;
            if self.events[idx].is_some() {
                self.last_returned = Some(idx);
                return self.events[idx].as_deref_mut();
            }
        }
        self.last_returned = None;
        None
    }

    /// Delete the event last returned by [`next`](Self::next), handing back
    /// ownership. Valid only immediately after a `next` call; a second call
    /// (or a call before any `next`) returns `None`.
    pub fn remove(&mut self) -> Option<Box<dyn ComplexEvent>> {
        let idx = self.last_returned.take()?;
        let event = self.events[idx].take();
        if event.is_some() {
            self.live -= 1;
        }
        event
    }

    /// Empty the sequence and rewind the cursor.
    pub fn clear(&mut self) {
        self.events.clear();
        self.cursor = 0;
        self.last_returned = None;
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Take every live event out of the chunk, preserving order. Used by the
    /// ordering pre-pass, which sorts out of band and re-appends.
    pub fn drain(&mut self) -> Vec<Box<dyn ComplexEvent>> {
        let events: Vec<Box<dyn ComplexEvent>> = self.events.drain(..).flatten().collect();
        self.cursor = 0;
        self.last_returned = None;
        self.live = 0;
        events
    }

    /// Consume the chunk into its live events, preserving order.
    pub fn into_events(self) -> Vec<Box<dyn ComplexEvent>> {
        self.events.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::stream::StreamEvent;
    use crate::core::event::value::AttributeValue;

    fn event(val: i32) -> Box<dyn ComplexEvent> {
        Box::new(StreamEvent::new_with_data(
            0,
            vec![AttributeValue::Int(val)],
        ))
    }

    fn values(chunk: &mut ComplexEventChunk) -> Vec<i32> {
        chunk.reset();
        let mut out = Vec::new();
        while let Some(ev) = chunk.next() {
            let se = ev.as_any().downcast_ref::<StreamEvent>().unwrap();
            out.push(se.before_window_data[0].as_i32().unwrap());
        }
        out
    }

    #[test]
    fn iterate_and_selectively_remove_in_one_pass() {
        let mut chunk = ComplexEventChunk::new(false);
        for v in [1, 2, 3, 4, 5] {
            chunk.add(event(v));
        }
        assert_eq!(chunk.len(), 5);

        chunk.reset();
        loop {
            let odd = match chunk.next() {
                None => break,
                Some(ev) => {
                    let se = ev.as_any().downcast_ref::<StreamEvent>().unwrap();
                    se.before_window_data[0].as_i32().unwrap() % 2 == 1
                }
            };
            if odd {
                assert!(chunk.remove().is_some());
            }
        }

        assert_eq!(chunk.len(), 2);
        assert_eq!(values(&mut chunk), vec![2, 4]);
    }

    #[test]
    fn remove_is_only_valid_immediately_after_next() {
        let mut chunk = ComplexEventChunk::new(false);
        chunk.add(event(1));
        assert!(chunk.remove().is_none());

        chunk.reset();
        assert!(chunk.next().is_some());
        assert!(chunk.remove().is_some());
        assert!(chunk.remove().is_none());
        assert!(chunk.is_empty());
    }

    #[test]
    fn reset_rewinds_without_mutating() {
        let mut chunk = ComplexEventChunk::new(true);
        chunk.add(event(7));
        chunk.add(event(8));

        assert_eq!(values(&mut chunk), vec![7, 8]);
        assert_eq!(values(&mut chunk), vec![7, 8]);
        assert!(chunk.is_batch());
    }

    #[test]
    fn clear_empties_the_sequence() {
        let mut chunk = ComplexEventChunk::new(false);
        chunk.add(event(1));
        chunk.clear();
        assert!(chunk.is_empty());
        assert!(!chunk.has_next());
        chunk.add(event(2));
        assert_eq!(values(&mut chunk), vec![2]);
    }

    #[test]
    fn drain_takes_live_events_in_order() {
        let mut chunk = ComplexEventChunk::new(false);
        for v in [1, 2, 3] {
            chunk.add(event(v));
        }
        chunk.reset();
        chunk.next();
        chunk.remove();

        let drained = chunk.drain();
        assert_eq!(drained.len(), 2);
        assert!(chunk.is_empty());
    }
}
