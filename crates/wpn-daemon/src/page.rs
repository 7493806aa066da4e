//! Renders the "What's Playing Now" page and writes it to disk.
//!
//! The output is the full popup document the station links to: current
//! track, the last ten songs (placeholder padded), and an update
//! timestamp, inside a fixed table-layout shell.  Every render fully
//! replaces the file.

use std::path::PathBuf;

use anyhow::Context;

use wpn_core::history::RenderSnapshot;

/// Strftime pattern for the "Updated:" footer, e.g.
/// `Mon Jan 02 03:04:05 PM EST 2006`.  `%Z` renders the real zone
/// abbreviation for the snapshot's timestamp.
const TIMESTAMP_FORMAT: &str = "%a %b %d %I:%M:%S %p %Z %Y";

pub struct PageWriter {
    output_path: PathBuf,
}

impl PageWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &std::path::Path {
        &self.output_path
    }

    /// Render the snapshot and overwrite the output file in one write.
    pub async fn write(&self, snapshot: &RenderSnapshot) -> anyhow::Result<()> {
        let html = render_document(snapshot);
        if let Some(parent) = self.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.output_path, html)
            .await
            .with_context(|| format!("writing {}", self.output_path.display()))?;
        Ok(())
    }
}

/// The `#titles` fragment: now playing, ten history rows, timestamp.
fn render_titles(snapshot: &RenderSnapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "<b>Now on Crystallite</b><br>{}",
        snapshot.now_playing
    ));
    lines.push("<br><b>The last ten songs on Crystallite</b><br>".to_string());

    for song in &snapshot.history {
        lines.push(format!("{song}<div style='height:4px;'></div>"));
    }

    let timestamp = snapshot.updated_at.format(TIMESTAMP_FORMAT);
    lines.push(format!("<div id='update'>Updated: {timestamp}</div>"));
    lines.join("\n")
}

fn render_document(snapshot: &RenderSnapshot) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta http-equiv="Refresh" content="180">
<title>Crystallite - What's Playing Now</title>
<link rel="stylesheet" href="wpnpop.css" type="text/css" media="all">
</head>
<body>
<table width="300" border="0" align="center" cellpadding="5" cellspacing="4" bgcolor="#FFFFFF">
<tr>
<td bgcolor="#666666" align="center">
<img src="whatsplayingnow220.gif" width="220" height="40" alt="What's Playing Now">
</td>
</tr>
<tr>
<td>
<div id="titles">
{content}
</div>
</td>
</tr>
<tr>
<td bgcolor="#666666" align="center">
<a href="javascript:self.close()">
<img src="close100.gif" width="100" height="19" border="0" alt="Close">
</a>
</td>
</tr>
</table>
</body>
</html>
"##,
        content = render_titles(snapshot)
    )
}
