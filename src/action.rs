use crate::app::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    OptimizeMemory,
    OptimizeCache,
    Refresh,
    ToggleHelp,
    CycleTheme,
    None,
}
