use std::any::Any;
use std::collections::BTreeMap;

use log::trace;
use qrgen_states::State;

use super::geometry::Size;
use super::machine::{TooltipConfig, TooltipMachine};

/// A tooltip machine plus what the renderer last measured for it.
#[derive(Debug)]
pub struct TooltipEntry {
    pub machine: TooltipMachine,
    /// Size of the floating label from the last frame it was drawn.
    pub measured_size: Option<Size>,
    touched: bool,
}

/// Owns every tooltip machine, keyed by widget id.
///
/// Entries not touched during a frame are dropped by [`Self::end_frame`],
/// which cancels their pending delay and detaches their viewport listener.
#[derive(Debug, Default)]
pub struct TooltipRegistry {
    entries: BTreeMap<u64, TooltipEntry>,
}

impl State for TooltipRegistry {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl TooltipRegistry {
    /// Returns the entry for `id`, creating it on first use, and marks it live
    /// for this frame.
    pub fn entry(&mut self, id: u64, config: TooltipConfig) -> &mut TooltipEntry {
        let entry = self.entries.entry(id).or_insert_with(|| TooltipEntry {
            machine: TooltipMachine::new(config),
            measured_size: None,
            touched: false,
        });
        if entry.machine.config() != config {
            entry.machine.set_config(config);
        }
        entry.touched = true;
        entry
    }

    pub fn get(&self, id: u64) -> Option<&TooltipEntry> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &TooltipEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries whose trigger was not shown this frame and returns how
    /// many were removed.
    pub fn end_frame(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| std::mem::take(&mut entry.touched));
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!("Dropped {removed} unmounted tooltip(s)");
        }
        removed
    }
}
