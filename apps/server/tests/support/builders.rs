use axum::body::Bytes;
use serde_json::json;

/// Converts a JSON value to request body bytes
pub fn to_json_body(value: &serde_json::Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Builder for game creation payloads
pub struct GameBuilder {
    title: String,
    short_description: String,
    markdown_content: String,
    difficulty_index: i32,
    group_size_index: i32,
    preperation_index: i32,
    physical_index: i32,
    duration_index: i32,
    tags: Vec<String>,
    age_groups: Vec<String>,
}

impl GameBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            short_description: format!("{title} in one line"),
            markdown_content: format!("# {title}\n\nHow to play."),
            title,
            difficulty_index: 3,
            group_size_index: 5,
            preperation_index: 2,
            physical_index: 4,
            duration_index: 5,
            tags: Vec::new(),
            age_groups: Vec::new(),
        }
    }

    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    pub fn markdown_content(mut self, text: impl Into<String>) -> Self {
        self.markdown_content = text.into();
        self
    }

    pub fn difficulty(mut self, index: i32) -> Self {
        self.difficulty_index = index;
        self
    }

    pub fn group_size(mut self, index: i32) -> Self {
        self.group_size_index = index;
        self
    }

    pub fn preperation(mut self, index: i32) -> Self {
        self.preperation_index = index;
        self
    }

    pub fn physical(mut self, index: i32) -> Self {
        self.physical_index = index;
        self
    }

    pub fn duration(mut self, index: i32) -> Self {
        self.duration_index = index;
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    pub fn age_group(mut self, name: impl Into<String>) -> Self {
        self.age_groups.push(name.into());
        self
    }

    pub fn build(self) -> serde_json::Value {
        json!({
            "title": self.title,
            "short_description": self.short_description,
            "markdown_content": self.markdown_content,
            "difficulty_index": self.difficulty_index,
            "group_size_index": self.group_size_index,
            "preperation_index": self.preperation_index,
            "physical_index": self.physical_index,
            "duration_index": self.duration_index,
            "tags": self.tags,
            "age_groups": self.age_groups,
        })
    }
}

/// A minimal valid game payload
pub fn minimal_game(title: &str) -> serde_json::Value {
    GameBuilder::new(title).build()
}
