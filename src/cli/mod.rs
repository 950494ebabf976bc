/// Command-line argument parsing for the `dice_calculator` tool.
pub mod args;
