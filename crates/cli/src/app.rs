use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use backpack_core::{Backpack, BackpackError, FieldLimits, Item, MenuChoice};
use tracing::{debug, info};

const BANNER_RULE: &str = "==============================";

/// Whether the loop keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Eof,
}

/// Text menu driving a single [`Backpack`].
pub struct BackpackApp<R, W> {
    input: R,
    output: W,
    backpack: Backpack,
    limits: FieldLimits,
}

impl<R: BufRead, W: Write> BackpackApp<R, W> {
    pub fn new(input: R, output: W, backpack: Backpack, limits: FieldLimits) -> Self {
        Self {
            input,
            output,
            backpack,
            limits,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER_RULE}")?;
        writeln!(self.output, "  INVENTORY SYSTEM - STARTING LOOT")?;
        writeln!(self.output, "{BANNER_RULE}")?;

        loop {
            self.render_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                debug!("input closed at menu");
                return self.farewell();
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => return self.farewell(),
                Ok(MenuChoice::Insert) => self.handle_insert()?,
                Ok(MenuChoice::Remove) => self.handle_remove()?,
                Ok(MenuChoice::List) => {
                    self.render_items()?;
                    Flow::Continue
                }
                Ok(MenuChoice::Find) => self.handle_find()?,
                Err(err) => {
                    debug!("{err}");
                    writeln!(self.output, "Invalid option! Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Eof {
                debug!("input closed mid-command");
                return self.farewell();
            }
        }
    }

    fn render_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- MENU ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{} - {}", choice.key(), choice.label())?;
        }
        Ok(())
    }

    fn handle_insert(&mut self) -> Result<Flow> {
        if self.backpack.is_full() {
            let full = BackpackError::Full {
                capacity: self.backpack.capacity(),
            };
            writeln!(self.output, "{}", failure_message(&full))?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\n--- New Item ---")?;
        let Some(name) = self.prompt("Item name: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(kind) = self.prompt("Item type (e.g. weapon, ammo, healing): ")? else {
            return Ok(Flow::Eof);
        };
        let Some(quantity) = self.prompt_quantity()? else {
            return Ok(Flow::Eof);
        };

        let item = Item::new(
            self.limits.clip_name(&name),
            self.limits.clip_kind(&kind),
            quantity,
        );
        let name = item.name.clone();
        match self.backpack.insert(item) {
            Ok(position) => {
                info!(name = %name, position, "Item added");
                writeln!(self.output, "Item added successfully!")?;
                self.render_items()?;
            }
            Err(err) => {
                debug!("{err}");
                writeln!(self.output, "{}", failure_message(&err))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_remove(&mut self) -> Result<Flow> {
        if self.backpack.is_empty() {
            writeln!(self.output, "{}", failure_message(&BackpackError::Empty))?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.prompt("\nName of the item to remove: ")? else {
            return Ok(Flow::Eof);
        };
        let name = self.limits.clip_name(&name);

        match self.backpack.remove_by_name(&name) {
            Ok((position, _)) => {
                info!(name = %name, position, "Item removed");
                writeln!(self.output, "Item removed successfully!")?;
                self.render_items()?;
            }
            Err(err) => {
                debug!("{err}");
                writeln!(self.output, "{}", failure_message(&err))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_find(&mut self) -> Result<Flow> {
        if self.backpack.is_empty() {
            writeln!(self.output, "The backpack is empty.")?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.prompt("\nName of the item to find: ")? else {
            return Ok(Flow::Eof);
        };
        let name = self.limits.clip_name(&name);

        match self.backpack.find_by_name(&name) {
            Some((position, item)) => {
                debug!(name = %name, position, "Item found");
                writeln!(self.output, "\nItem found!\n{item}")?;
            }
            None => writeln!(self.output, "Item '{name}' not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn render_items(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== ITEMS IN BACKPACK ===")?;
        if self.backpack.is_empty() {
            writeln!(self.output, "Backpack is empty.")?;
            return Ok(());
        }
        for (idx, item) in self.backpack.iter().enumerate() {
            writeln!(self.output, "Item {}:\n{item}", idx + 1)?;
        }
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        writeln!(self.output, "Leaving the system... Goodbye!")?;
        self.output.flush().context("failed to flush output")?;
        info!(items = self.backpack.len(), "Backpack closed");
        Ok(())
    }

    fn prompt_quantity(&mut self) -> Result<Option<i32>> {
        loop {
            let Some(line) = self.prompt("Quantity: ")? else {
                return Ok(None);
            };
            match line.trim().parse::<i32>() {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(err) => {
                    debug!(input = %line, "rejected quantity: {err}");
                    writeln!(self.output, "Quantity must be a whole number.")?;
                }
            }
        }
    }

    /// Print `label` and read one line without its terminator. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD rather than failing the read.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("failed to flush output")?;

        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        while matches!(raw.last(), Some(b'\n' | b'\r')) {
            raw.pop();
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }
}

/// User-facing text for a rejected backpack operation.
fn failure_message(err: &BackpackError) -> String {
    match err {
        BackpackError::Full { .. } => {
            "The backpack is full! No more items can be added.".to_string()
        }
        BackpackError::Empty => "The backpack is empty. Nothing to remove.".to_string(),
        BackpackError::NotFound(name) => format!("Item '{name}' not found in the backpack."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backpack_core::DEFAULT_CAPACITY;
    use std::io::Cursor;

    fn run_script(script: &str) -> Result<(String, Backpack)> {
        run_with(script, Backpack::new(), FieldLimits::default())
    }

    fn run_with(
        script: &str,
        backpack: Backpack,
        limits: FieldLimits,
    ) -> Result<(String, Backpack)> {
        run_bytes(script.as_bytes(), backpack, limits)
    }

    fn run_bytes(
        script: &[u8],
        backpack: Backpack,
        limits: FieldLimits,
    ) -> Result<(String, Backpack)> {
        let mut app = BackpackApp::new(
            Cursor::new(script.to_vec()),
            Vec::new(),
            backpack,
            limits,
        );
        app.run()?;
        Ok((String::from_utf8(app.output)?, app.backpack))
    }

    #[test]
    fn exit_prints_farewell() -> Result<()> {
        let (output, backpack) = run_script("0\n")?;
        assert!(output.contains("INVENTORY SYSTEM"));
        assert!(output.contains("1 - Insert item"));
        assert!(output.contains("0 - Exit"));
        assert!(output.ends_with("Leaving the system... Goodbye!\n"));
        assert!(backpack.is_empty());
        Ok(())
    }

    #[test]
    fn end_of_input_exits_cleanly() -> Result<()> {
        let (output, _) = run_script("")?;
        assert!(output.ends_with("Goodbye!\n"));
        Ok(())
    }

    #[test]
    fn end_of_input_mid_insert_exits_cleanly() -> Result<()> {
        let (output, backpack) = run_script("1\nSword\nweapon\n")?;
        assert!(output.ends_with("Quantity: Leaving the system... Goodbye!\n"));
        assert!(backpack.is_empty());
        Ok(())
    }

    #[test]
    fn insert_then_list() -> Result<()> {
        let (output, backpack) = run_script(
            "1\nSword\nweapon\n1\n1\nPotion\nhealing\n3\n1\nSword\nweapon\n2\n3\n0\n",
        )?;
        assert_eq!(
            backpack.items(),
            &[
                Item::new("Sword", "weapon", 1),
                Item::new("Potion", "healing", 3),
                Item::new("Sword", "weapon", 2),
            ][..]
        );
        assert!(output.contains("Item added successfully!"));
        assert!(output.contains("Item 3:\n  Name: Sword\n  Type: weapon\n  Quantity: 2"));
        Ok(())
    }

    #[test]
    fn remove_renumbers_listing() -> Result<()> {
        let (output, backpack) = run_script(
            "1\nSword\nweapon\n1\n1\nPotion\nhealing\n3\n1\nSword\nweapon\n2\n2\nSword\n0\n",
        )?;
        assert_eq!(
            backpack.items(),
            &[
                Item::new("Potion", "healing", 3),
                Item::new("Sword", "weapon", 2),
            ][..]
        );
        let tail = output
            .rsplit("Item removed successfully!")
            .next()
            .unwrap_or_default();
        assert!(tail.contains("Item 1:\n  Name: Potion"));
        assert!(tail.contains("Item 2:\n  Name: Sword\n  Type: weapon\n  Quantity: 2"));
        Ok(())
    }

    #[test]
    fn empty_backpack_messages() -> Result<()> {
        let (output, _) = run_script("3\n2\n4\n0\n")?;
        assert!(output.contains("Backpack is empty."));
        assert!(output.contains("The backpack is empty. Nothing to remove."));
        assert!(output.contains("The backpack is empty.\n"));
        assert!(!output.contains("Name of the item"));
        Ok(())
    }

    #[test]
    fn find_reports_match_and_miss() -> Result<()> {
        let (output, _) = run_script("1\nPotion\nhealing\n3\n4\nPotion\n4\npotion\n0\n")?;
        assert!(output.contains("Item found!\n  Name: Potion\n  Type: healing\n  Quantity: 3"));
        assert!(output.contains("Item 'potion' not found."));
        Ok(())
    }

    #[test]
    fn remove_missing_reports_not_found() -> Result<()> {
        let (output, backpack) = run_script("1\nPotion\nhealing\n3\n2\nShield\n0\n")?;
        assert!(output.contains("Item 'Shield' not found in the backpack."));
        assert_eq!(backpack.len(), 1);
        Ok(())
    }

    #[test]
    fn invalid_choice_redisplays_menu() -> Result<()> {
        let (output, _) = run_script("9\nabc\n0\n")?;
        assert_eq!(output.matches("Invalid option! Try again.").count(), 2);
        assert_eq!(output.matches("--- MENU ---").count(), 3);
        Ok(())
    }

    #[test]
    fn full_backpack_rejects_without_prompting() -> Result<()> {
        let (output, backpack) = run_with(
            "1\nRope\nmisc\n1\n1\n0\n",
            Backpack::with_capacity(1),
            FieldLimits::default(),
        )?;
        assert_eq!(backpack.len(), 1);
        assert!(output.contains("The backpack is full!"));
        assert_eq!(output.matches("Item name: ").count(), 1);
        Ok(())
    }

    #[test]
    fn quantity_is_reprompted_until_numeric() -> Result<()> {
        let (output, backpack) = run_script("1\nArrow\nammo\nmany\n-5\n0\n")?;
        assert!(output.contains("Quantity must be a whole number."));
        assert_eq!(backpack.items(), &[Item::new("Arrow", "ammo", -5)][..]);
        Ok(())
    }

    #[test]
    fn fields_and_queries_are_clipped() -> Result<()> {
        let limits = FieldLimits { name: 4, kind: 3 };
        let (output, backpack) = run_with(
            "1\nLongsword\nweapon\n1\n4\nLongbow\n2\nLong\n0\n",
            Backpack::new(),
            limits,
        )?;
        assert!(output.contains("Item found!\n  Name: Long\n  Type: wea"));
        assert!(backpack.is_empty());
        Ok(())
    }

    #[test]
    fn crlf_input_is_accepted() -> Result<()> {
        let (_, backpack) = run_script("1\r\nTorch\r\ntool\r\n2\r\n0\r\n")?;
        assert_eq!(backpack.items(), &[Item::new("Torch", "tool", 2)][..]);
        Ok(())
    }

    #[test]
    fn non_utf8_menu_line_is_an_invalid_option() -> Result<()> {
        let (output, _) = run_bytes(b"\xff\xfe\n0\n", Backpack::new(), FieldLimits::default())?;
        assert!(output.contains("Invalid option! Try again."));
        assert!(output.ends_with("Goodbye!\n"));
        Ok(())
    }

    #[test]
    fn non_utf8_item_name_is_stored_and_found() -> Result<()> {
        let (output, backpack) = run_bytes(
            b"1\nSw\xe9rd\nweapon\n1\n4\nSw\xe9rd\n3\n0\n",
            Backpack::new(),
            FieldLimits::default(),
        )?;
        assert_eq!(
            backpack.items(),
            &[Item::new("Sw\u{FFFD}rd", "weapon", 1)][..]
        );
        assert!(output.contains("Item found!\n  Name: Sw\u{FFFD}rd"));
        assert!(output.ends_with("Goodbye!\n"));
        Ok(())
    }

    #[test]
    fn eleventh_insert_into_default_backpack_is_rejected() -> Result<()> {
        let mut script = String::new();
        for idx in 0..DEFAULT_CAPACITY {
            script.push_str(&format!("1\nitem-{idx}\nmisc\n{idx}\n"));
        }
        script.push_str("1\n0\n");

        let (output, backpack) = run_script(&script)?;
        assert_eq!(backpack.len(), 10);
        assert_eq!(output.matches("Item added successfully!").count(), 10);
        assert_eq!(
            output
                .matches("The backpack is full! No more items can be added.")
                .count(),
            1
        );
        assert_eq!(output.matches("Item name: ").count(), 10);
        assert_eq!(backpack.items()[9], Item::new("item-9", "misc", 9));
        Ok(())
    }
}
