pub fn get_help_text() -> &'static str {
    r#"
╔════════════════════════════════════════════════════════════════╗
║                     CATVIEW - Installations                    ║
║                        Keyboard & Mouse                        ║
╚════════════════════════════════════════════════════════════════╝

PAGE
  ↑ / k              Scroll the page up
  ↓ / j              Scroll the page down
  PgUp / PgDn        Scroll the page by one screen
  Home / End         Jump to the top / bottom of the page

CAROUSELS
  ← / h              Step the hovered carousel back one card
  → / l              Step the hovered carousel forward one card
  Mouse wheel        Step the carousel under the pointer
  Drag               Scroll the carousel under the pointer

VERSIONS
  /                  Focus the search box
  Type characters    Filter versions by name
  Backspace          Delete last character from search
  ESC                Clear the search, then leave the box
  ENTER / TAB        Leave the search box
  Mouse wheel        Scroll the grid, then the page

GENERAL
  Click              Activate a button, link or card
  ?                  Show/hide this help screen
  q / ESC            Quit
  Ctrl+C             Quit

───────────────────────────────────────────────────────────────────

TIPS
  • While the pointer rests on a carousel the page does not scroll
  • Installed versions never appear in the grid
  • Edges fade out while there is more to scroll in that direction

"#
}
