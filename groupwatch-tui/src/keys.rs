//! Keybinding definitions for the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use groupwatch_core::AssignmentField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    CycleCategory,
    /// Pick a category chip by 0-based index.
    SelectCategory(usize),
    /// Step the list filter for a field through its option list.
    CycleFilter(AssignmentField),
    /// Step the selected group's assignment through the option list.
    CycleAssignment(AssignmentField),
    ResetFilters,
    ClearStatus,
    DeleteGroup,
    CleanInvalidStatuses,
    CleanStaleStatuses,
    CheckSoftDelete,
    OpenHelp,
    OpenSearch,
    Refresh,
    Confirm,
    Cancel,
}

/// Keystrokes while the name search is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Insert(char),
    Backspace,
    Clear,
    Submit,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('c') => Some(Action::CycleCategory),
        KeyCode::Char('s') => Some(Action::CycleFilter(AssignmentField::Squad)),
        KeyCode::Char('h') => Some(Action::CycleFilter(AssignmentField::Head)),
        KeyCode::Char('g') => Some(Action::CycleFilter(AssignmentField::Manager)),
        KeyCode::Char('S') => Some(Action::CycleAssignment(AssignmentField::Squad)),
        KeyCode::Char('H') => Some(Action::CycleAssignment(AssignmentField::Head)),
        KeyCode::Char('G') => Some(Action::CycleAssignment(AssignmentField::Manager)),
        KeyCode::Char('0') => Some(Action::ResetFilters),
        KeyCode::Char('x') => Some(Action::ClearStatus),
        KeyCode::Char('d') => Some(Action::DeleteGroup),
        KeyCode::Char('C') => Some(Action::CleanInvalidStatuses),
        KeyCode::Char('O') => Some(Action::CleanStaleStatuses),
        KeyCode::Char('m') => Some(Action::CheckSoftDelete),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('[') => Some(Action::PrevPage),
        KeyCode::Right | KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Char(c @ '1'..='6') => Some(Action::SelectCategory(c as usize - '1' as usize)),
        _ => None,
    }
}

pub fn map_search_key(event: KeyEvent) -> Option<SearchKey> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('u') => Some(SearchKey::Clear),
            KeyCode::Char('c') => Some(SearchKey::Cancel),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(SearchKey::Submit),
        KeyCode::Esc => Some(SearchKey::Cancel),
        KeyCode::Backspace => Some(SearchKey::Backspace),
        KeyCode::Char(c) => Some(SearchKey::Insert(c)),
        _ => None,
    }
}

/// Lines of the help overlay.
pub const HELP_LINES: &[(&str, &str)] = &[
    ("q / Ctrl-C", "sair"),
    ("Tab", "alternar tela"),
    ("/", "buscar por nome"),
    ("c, 1-6", "filtrar por categoria"),
    ("s / h / g", "filtrar por squad / head / gestor"),
    ("0", "limpar filtros"),
    ("S / H / G", "alterar squad / head / gestor do grupo"),
    ("↑ ↓", "selecionar grupo"),
    ("← → [ ]", "mudar de página"),
    ("x", "limpar status do grupo"),
    ("d", "excluir grupo"),
    ("C", "limpar status sem mensagens"),
    ("O", "limpar status não atualizados hoje"),
    ("m", "verificar exclusão lógica"),
    ("r / Ctrl-R", "atualizar"),
    ("Enter / Esc", "confirmar / cancelar"),
];
