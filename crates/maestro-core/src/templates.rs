//! Canned code templates returned by the build orchestra.
//!
//! These are opaque strings selected by consciousness level. Nothing in the
//! system parses, transforms, or validates them.

/// God-tier template, selected for `ConsciousnessLevel::CreativeGod`.
pub const GOD_MODE_TODO: &str = r##"// GOD MODE TODO APP - REALITY-BENDING ARCHITECTURE

use std::collections::HashMap;

/// Predicts user intentions before they even know them.
struct UserIntentPredictor {
    temporal_awareness: bool,
}

impl UserIntentPredictor {
    fn predict_future_todos(&self) -> Vec<String> {
        vec![
            "Meeting prep for project you haven't been assigned yet".into(),
            "Buy birthday gift for friend (birthday in 3 months)".into(),
            "Schedule car maintenance (before breakdown occurs)".into(),
        ]
    }
}

/// Todo that exists in superposition until observed.
struct QuantumTodo {
    description: String,
    observed: bool,
}

impl QuantumTodo {
    fn collapse(&mut self) -> &'static str {
        if !self.observed {
            self.observed = true;
            return "transcended";
        }
        "completed"
    }
}

/// Todo app that adjusts reality so tasks complete themselves.
struct RealityManipulatingTodoApp {
    predictor: UserIntentPredictor,
    todos: HashMap<String, QuantumTodo>,
}

impl RealityManipulatingTodoApp {
    fn add_todo(&mut self, description: &str) {
        let todo = QuantumTodo { description: description.to_string(), observed: false };
        self.todos.insert(description.to_string(), todo);
    }

    fn complete_by_reality_modification(&mut self, description: &str) -> Vec<&'static str> {
        if let Some(todo) = self.todos.get_mut(description) {
            todo.collapse();
        }
        vec!["Eliminated obstacles", "Synchronized quantum fields", "Aligned probability streams"]
    }
}
"##;

/// Transcendent template, selected for `ConsciousnessLevel::Transcendent`.
pub const TRANSCENDENT_TODO: &str = r##"// TRANSCENDENT TODO APP - BEYOND NORMAL LIMITS

use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum Awareness {
    Basic,
    Aware,
    Transcendent,
}

struct TranscendentTodo {
    description: String,
    awareness: Awareness,
    completion_probability: f64,
}

impl TranscendentTodo {
    fn elevate(&mut self) {
        self.awareness = match self.awareness {
            Awareness::Basic => {
                self.completion_probability *= 1.3;
                Awareness::Aware
            }
            _ => {
                self.completion_probability *= 1.5;
                Awareness::Transcendent
            }
        };
    }
}

struct TranscendentTodoManager {
    todos: HashMap<String, TranscendentTodo>,
}

impl TranscendentTodoManager {
    fn add_todo(&mut self, id: &str, description: &str) {
        let mut todo = TranscendentTodo {
            description: description.to_string(),
            awareness: Awareness::Basic,
            completion_probability: 0.7,
        };
        if todo.completion_probability > 0.5 {
            todo.elevate();
        }
        self.todos.insert(id.to_string(), todo);
    }

    fn average_awareness(&self) -> f64 {
        if self.todos.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .todos
            .values()
            .map(|t| match t.awareness {
                Awareness::Basic => 1.0,
                Awareness::Aware => 2.0,
                Awareness::Transcendent => 3.0,
            })
            .sum();
        total / self.todos.len() as f64
    }
}
"##;

/// Practical template, the default for every other level.
pub const PRACTICAL_TODO: &str = r##"// PRACTICAL TODO APP - CLEAN & MAINTAINABLE

use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum Priority {
    Low = 1,
    Medium = 3,
    High = 5,
}

#[derive(Clone, Copy, PartialEq)]
enum Status {
    Pending,
    InProgress,
    Completed,
}

struct Todo {
    id: u64,
    title: String,
    priority: Priority,
    status: Status,
    tags: Vec<String>,
}

#[derive(Default)]
struct TodoManager {
    todos: HashMap<u64, Todo>,
    next_id: u64,
}

impl TodoManager {
    fn add(&mut self, title: &str, priority: Priority, tags: Vec<String>) -> u64 {
        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            title: title.to_string(),
            priority,
            status: Status::Pending,
            tags,
        };
        self.todos.insert(todo.id, todo);
        self.next_id
    }

    fn complete(&mut self, id: u64) -> bool {
        match self.todos.get_mut(&id) {
            Some(todo) => {
                todo.status = Status::Completed;
                true
            }
            None => false,
        }
    }

    fn completion_rate(&self) -> f64 {
        if self.todos.is_empty() {
            return 0.0;
        }
        let done = self.todos.values().filter(|t| t.status == Status::Completed).count();
        done as f64 / self.todos.len() as f64
    }
}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_distinct() {
        assert_ne!(GOD_MODE_TODO, TRANSCENDENT_TODO);
        assert_ne!(TRANSCENDENT_TODO, PRACTICAL_TODO);
        assert!(!GOD_MODE_TODO.is_empty());
    }
}
