use std::fmt::Write;

use zxp_magic::ExtensionRecord;

const MAX_NAME_WIDTH: usize = 32;
const MAX_VERSION_WIDTH: usize = 10;
const LINE_BUDGET: usize = 90;

/// One line per extension: name, version and supported hosts.
pub fn extension_table(records: &[ExtensionRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No extensions installed\n");
        return out;
    }

    let name_width = column_width(records.iter().map(|r| r.name.as_str()), MAX_NAME_WIDTH);
    let version_width =
        column_width(records.iter().map(|r| r.version.as_str()), MAX_VERSION_WIDTH);
    let hosts_budget = LINE_BUDGET.saturating_sub(2 + name_width + 2 + version_width + 2);

    for record in records {
        let _ = writeln!(
            out,
            "  {:<nw$}  {:<vw$}  {}",
            truncate(&record.name, name_width),
            truncate(&record.version, version_width),
            truncate(&record.hosts_label(), hosts_budget),
            nw = name_width,
            vw = version_width,
        );
    }

    let noun = if records.len() == 1 { "extension" } else { "extensions" };
    let _ = write!(out, "\n{} {noun}\n", records.len());
    out
}

/// Every known field of one extension, one per line.
pub fn extension_details(record: &ExtensionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", record.name);
    let _ = writeln!(out, "ID:          {}", record.id);
    let _ = writeln!(out, "Version:     {}", record.version);

    if let Some(author) = &record.author {
        let _ = writeln!(out, "Author:      {author}");
    }
    if let Some(runtime) = &record.cep_runtime_version {
        let _ = writeln!(out, "CEP:         {runtime}");
    }
    if !record.host_compatibility.is_empty() {
        let hosts: Vec<String> = record
            .host_compatibility
            .iter()
            .map(|h| format!("{} {}", h.host_name, h.host_version))
            .collect();
        let _ = writeln!(out, "Hosts:       {}", hosts.join(", "));
    }
    if let Some(path) = &record.install_path {
        let _ = writeln!(out, "Path:        {}", path.display());
    }
    if let Some(desc) = &record.description {
        let _ = write!(out, "\n{desc}\n");
    }
    out
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, max: usize) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0).min(max)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
