mod edit_task_modal;
mod goal_modal;
mod markup_surface;
mod page_tabs;
mod priority_select;
mod search_bar;
mod task_form;

pub use edit_task_modal::EditTaskModal;
pub use goal_modal::GoalModal;
pub use markup_surface::MarkupSurface;
pub use page_tabs::PageTabs;
pub use priority_select::PrioritySelect;
pub use search_bar::SearchBar;
pub use task_form::TaskForm;
