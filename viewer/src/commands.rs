use anyhow::Result;

use model::ViewportChange;

/// One line typed by the user, standing in for the slider and map controls
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// A minute of the day, or -1 for no filter
    Slider(i32),
    Viewport(ViewportChange),
    Render,
    Quit,
}

pub const HELP: &str = "Commands: time <minute or -1>, pan <dx> <dy>, zoom <level>, resize <width> <height>, render, quit";

/// Blank lines and comments starting with # are None.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let cmd = match words.as_slice() {
        ["time", value] => Command::Slider(value.parse()?),
        ["pan", dx, dy] => Command::Viewport(ViewportChange::Pan {
            dx: dx.parse()?,
            dy: dy.parse()?,
        }),
        ["zoom", zoom] => Command::Viewport(ViewportChange::Zoom(zoom.parse()?)),
        ["resize", width, height] => Command::Viewport(ViewportChange::Resize {
            width: width.parse()?,
            height: height.parse()?,
        }),
        ["render"] => Command::Render,
        ["quit"] | ["exit"] => Command::Quit,
        _ => bail!("Unknown command {:?}. {}", line, HELP),
    };
    Ok(Some(cmd))
}
