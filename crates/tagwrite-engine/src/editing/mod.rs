/*!
 * # Editing Core
 *
 * Turns a stream of keystrokes into tag placeholders inside the host's
 * editable markup.
 *
 * ## How a tag is typed
 *
 * 1. In `Idle`, a registered trigger character is swallowed and a *draft*
 *    placeholder showing the trigger is appended to the markup.
 * 2. While `ComposingTag`, printable characters grow the [`WordTracker`]
 *    and the draft text; Backspace shrinks both, and deletes the draft once
 *    the word is empty.
 * 3. Picking a candidate *finalizes* the draft (trigger and value are
 *    written as attributes) and appends the tag separator.
 * 4. A space instead leaves the draft behind as literal text.
 *
 * The markup is the single source of truth. Each transition parses it with
 * `tagwrite_syntax`, edits the tree through [`LiveMarkup`] and writes the
 * whole string back, so the engine never holds references into the host.
 *
 * ## Module Structure
 *
 * - **`key`**: the closed [`KeyInput`] enum, decoded once at the boundary
 * - **`word`**: [`WordTracker`], the partially typed word
 * - **`live`**: [`LiveMarkup`], draft edits over the parsed markup
 * - **`machine`**: [`TagMachine`] and its transitions
 *
 * ```rust
 * use tagwrite_engine::editing::KeyInput;
 *
 * assert_eq!(KeyInput::from_key_name("Backspace"), Some(KeyInput::Backspace));
 * assert_eq!(KeyInput::from_key_name("@"), Some(KeyInput::Printable('@')));
 * ```
 */

pub mod key;
pub mod live;
pub mod machine;
pub mod word;

pub use key::{ArrowKey, KeyInput};
pub use live::LiveMarkup;
pub use machine::{Context, KeyOutcome, TagMachine, TagState};
pub use word::WordTracker;
