/// Complete database schema for the question store.
///
/// Uses CREATE TABLE/INDEX IF NOT EXISTS for idempotent execution.
/// UNIQUE constraints back the get-or-create upserts on tag names, tag values
/// and links.
pub const INITIAL_SCHEMA: &str = r#"
-- Questions table: title and answer text
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    answer TEXT NOT NULL
);

-- Tag names: unique across the store
CREATE TABLE IF NOT EXISTS tag_names (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Tag values: one value under a tag name, unique per (name, value)
CREATE TABLE IF NOT EXISTS tag_values (
    id INTEGER PRIMARY KEY,
    tag_name_id INTEGER NOT NULL,
    value TEXT NOT NULL,
    UNIQUE (tag_name_id, value),
    FOREIGN KEY (tag_name_id) REFERENCES tag_names(id)
);

-- Junction table: links questions to tag values (many-to-many)
CREATE TABLE IF NOT EXISTS question_tag_links (
    id INTEGER PRIMARY KEY,
    question_id INTEGER NOT NULL,
    tag_value_id INTEGER NOT NULL,
    UNIQUE (question_id, tag_value_id),
    FOREIGN KEY (question_id) REFERENCES questions(id),
    FOREIGN KEY (tag_value_id) REFERENCES tag_values(id)
);

-- Indexes for efficient junction table lookups
CREATE INDEX IF NOT EXISTS idx_question_tag_links_question ON question_tag_links(question_id);
CREATE INDEX IF NOT EXISTS idx_question_tag_links_value ON question_tag_links(tag_value_id);
"#;
