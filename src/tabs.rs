//! Tab switcher for the hourly panel.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourlyTab {
    Temperature,
    Wind,
}

impl HourlyTab {
    pub const ALL: [HourlyTab; 2] = [HourlyTab::Temperature, HourlyTab::Wind];

    pub fn title(&self) -> &'static str {
        match self {
            HourlyTab::Temperature => "Temperature",
            HourlyTab::Wind => "Wind",
        }
    }
}

/// One tab is active at a time. Switching hides the panel content for a fixed
/// number of ticks before revealing the new panel.
#[derive(Debug, Clone)]
pub struct TabSwitcher {
    active: usize,
    reveal_delay: usize,
    reveal_in: usize,
}

impl TabSwitcher {
    pub fn new(reveal_delay: usize) -> Self {
        Self {
            active: 0,
            reveal_delay,
            reveal_in: 0,
        }
    }

    pub fn active(&self) -> HourlyTab {
        HourlyTab::ALL[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, tab: HourlyTab) -> bool {
        self.active() == tab
    }

    pub fn select(&mut self, index: usize) {
        if index >= HourlyTab::ALL.len() || index == self.active {
            return;
        }
        self.active = index;
        self.reveal_in = self.reveal_delay;
    }

    pub fn next(&mut self) {
        self.select((self.active + 1) % HourlyTab::ALL.len());
    }

    pub fn on_tick(&mut self) {
        self.reveal_in = self.reveal_in.saturating_sub(1);
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal_in == 0
    }
}
