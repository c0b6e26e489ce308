use std::fmt;

use serde::{Deserialize, Serialize};

use crate::line::Line;

/// A stable handle to a line in a [`crate::document::Document`].
/// Two handles are equal if and only if they point at the same line.
/// A handle never points at a different line after its line has been destroyed, thanks to the generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId {
    index: u32,
    generation: u32,
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}v{}", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    value: Option<Line>,
}

/// Generational storage for lines. Freed slots are reused, but with a bumped generation.
#[derive(Default)]
pub(crate) struct LineArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl LineArena {
    pub fn insert(&mut self, line: Line) -> LineId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(line);
            return LineId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).expect("Too many lines");
        self.slots.push(Slot {
            generation: 0,
            value: Some(line),
        });
        LineId {
            index,
            generation: 0,
        }
    }

    /// Takes the line out of the arena. The handle becomes stale.
    pub fn remove(&mut self, id: LineId) -> Line {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .expect("Stale line handle");
        let line = slot.value.take().expect("Stale line handle");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        line
    }

    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.live
    }
}
