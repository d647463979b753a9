use crate::model::{FilterMode, Task, TaskId};

/// Counts over the full collection, independent of the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub uncompleted: usize,
}

impl TaskCounts {
    pub fn for_mode(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.total,
            FilterMode::Completed => self.completed,
            FilterMode::Uncompleted => self.uncompleted,
        }
    }
}

/// The client-side view of the task collection: the tasks as last seen
/// from the service plus the active filter.
///
/// Mutations follow confirmed-write-then-apply: callers hand in the
/// service's response representation and the matching entry is replaced,
/// appended, or removed wholesale. Nothing here merges or reconciles.
#[derive(Debug, Clone, Default)]
pub struct TaskListView {
    tasks: Vec<Task>,
    filter: FilterMode,
}

impl TaskListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Purely local; never touches the network.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// The visible subsequence under the active filter, in collection order.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Recomputed from the full collection on every call; `completed +
    /// uncompleted == total` holds for every collection state.
    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            completed,
            uncompleted: self.tasks.len() - completed,
        }
    }

    /// Replace the whole collection with a fresh fetch result.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Append a newly created task to the end of the collection.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the entry with the matching id wholesale. An unknown id is
    /// dropped, not inserted.
    pub fn apply_updated(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the matching id, leaving every other entry
    /// untouched.
    pub fn apply_deleted(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        self.tasks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: u64, text: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: text.to_string(),
            completed,
        }
    }

    fn seeded() -> TaskListView {
        let mut view = TaskListView::new();
        view.replace_all(vec![
            task(1, "Buy milk", false),
            task(2, "Call bank", true),
            task(3, "Water plants", false),
            task(4, "File taxes", true),
        ]);
        view
    }

    #[test]
    fn counts_always_partition_the_collection() {
        let mut view = TaskListView::new();
        assert_eq!(
            view.counts(),
            TaskCounts {
                total: 0,
                completed: 0,
                uncompleted: 0
            }
        );

        view = seeded();
        let counts = view.counts();
        assert_eq!(counts.completed + counts.uncompleted, counts.total);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.completed, 2);

        view.apply_deleted(&TaskId::from(2));
        let counts = view.counts();
        assert_eq!(counts.completed + counts.uncompleted, counts.total);
        assert_eq!(counts.completed, 1);
    }

    #[test]
    fn counts_come_from_the_full_collection_not_the_filtered_view() {
        let mut view = seeded();
        view.set_filter(FilterMode::Completed);
        assert_eq!(view.visible().len(), 2);
        assert_eq!(view.counts().total, 4);
        assert_eq!(view.counts().uncompleted, 2);
    }

    #[test]
    fn all_filter_is_the_identity() {
        let view = seeded();
        let visible: Vec<&Task> = view.visible();
        assert_eq!(visible.len(), view.tasks().len());
        for (shown, held) in visible.iter().zip(view.tasks()) {
            assert_eq!(*shown, held);
        }
    }

    #[test]
    fn completed_and_uncompleted_partition_preserves_order() {
        let mut view = seeded();

        view.set_filter(FilterMode::Completed);
        let completed: Vec<TaskId> = view.visible().iter().map(|t| t.id.clone()).collect();
        assert_eq!(completed, vec![TaskId::from(2), TaskId::from(4)]);

        view.set_filter(FilterMode::Uncompleted);
        let uncompleted: Vec<TaskId> = view.visible().iter().map(|t| t.id.clone()).collect();
        assert_eq!(uncompleted, vec![TaskId::from(1), TaskId::from(3)]);

        // Interleaving both subsequences back by collection position
        // reconstructs the original sequence.
        let mut merged = Vec::new();
        let mut completed = completed.into_iter().peekable();
        let mut uncompleted = uncompleted.into_iter().peekable();
        for original in view.tasks() {
            if completed.peek() == Some(&original.id) {
                merged.push(completed.next().unwrap());
            } else if uncompleted.peek() == Some(&original.id) {
                merged.push(uncompleted.next().unwrap());
            }
        }
        let original: Vec<TaskId> = view.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(merged, original);
    }

    #[test]
    fn created_task_is_appended_at_the_end() {
        let mut view = seeded();
        view.apply_created(task(7, "Buy milk", false));

        assert_eq!(view.tasks().len(), 5);
        assert_eq!(view.tasks().last().unwrap(), &task(7, "Buy milk", false));
    }

    #[test]
    fn updated_task_is_replaced_wholesale() {
        let mut view = seeded();
        let replacement = task(1, "Buy oat milk", true);

        assert!(view.apply_updated(replacement.clone()));
        assert_eq!(&view.tasks()[0], &replacement);
        assert_eq!(&view.tasks()[1], &task(2, "Call bank", true));
        assert_eq!(view.tasks().len(), 4);
    }

    #[test]
    fn update_for_an_unknown_id_is_dropped() {
        let mut view = seeded();
        assert!(!view.apply_updated(task(99, "Ghost", true)));
        assert_eq!(view.tasks().len(), 4);
    }

    #[test]
    fn deleted_task_is_removed_without_touching_the_rest() {
        let mut view = seeded();
        let survivors: Vec<Task> = view
            .tasks()
            .iter()
            .filter(|t| t.id != TaskId::from(3))
            .cloned()
            .collect();

        assert!(view.apply_deleted(&TaskId::from(3)));
        assert_eq!(view.tasks().len(), 3);
        assert_eq!(view.tasks(), survivors.as_slice());

        assert!(!view.apply_deleted(&TaskId::from(3)));
        assert_eq!(view.tasks().len(), 3);
    }
}
