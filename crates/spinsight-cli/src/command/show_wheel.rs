use std::io::Write as _;

use spinsight_wheel::{SlotColor, WheelTopology};

use crate::util::Output;

pub(crate) fn run() -> anyhow::Result<()> {
    let wheel = WheelTopology::american();
    let mut output = Output::stdout();
    writeln!(output, "American wheel rim, clockwise from 0:")?;
    for (position, &slot) in wheel.slots().iter().enumerate() {
        let color = match slot.color() {
            SlotColor::Red => "red",
            SlotColor::Black => "black",
            SlotColor::Green => "green",
        };
        let label = slot.to_string();
        writeln!(output, "{position:>3}  {label:>3}  {color}")?;
    }
    output.flush()?;
    Ok(())
}
