//! # TUI Components
//!
//! All UI components for the chat screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: assistant name, status line and model
//! - `MessageBubble`: one conversation message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: draft editor, disabled while a fetch is outstanding
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! `FadeIn` is not a component; it computes the mount opacity that
//! `MessageList` passes down to each bubble.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Top bar)
//! ├── fade.rs          (Mount fade-in curve)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Draft editor)
//! ```

pub mod fade;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
