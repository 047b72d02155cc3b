use rmmp_fetch::{MirrorRecord, composite_score};
use rmmp_root::ModuleInfo;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

pub struct Formatter;

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub header: Option<String>,
}

impl Formatter {
    pub fn render<T: Tabled>(data: impl IntoIterator<Item = T>, config: FormatConfig) -> Table {
        let mut table = Table::new(data);
        if let Some(header) = config.header {
            table.with(Panel::header(header));
        }

        table.with(Style::blank());
        table
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct MirrorRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub url: String,
    pub server: String,
    pub ip: String,
    #[tabled(rename = "latency (ms)")]
    pub latency: u32,
    #[tabled(rename = "speed (MB/s)")]
    pub speed: String,
    pub score: String,
}

impl MirrorRow {
    pub fn rows(records: &[MirrorRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| Self {
                index: i + 1,
                url: record.url.clone(),
                server: record.server.clone(),
                ip: record.ip.clone(),
                latency: record.latency_ms,
                speed: format!("{:.2}", record.speed_mbs),
                score: format!("{:.3}", composite_score(record)),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct ModuleRow {
    pub id: String,
    pub name: String,
    pub version: String,
    pub code: String,
    pub author: String,
    pub state: &'static str,
    pub update: &'static str,
}

impl From<&ModuleInfo> for ModuleRow {
    fn from(module: &ModuleInfo) -> Self {
        Self {
            id: module.id.clone(),
            name: module.name.clone(),
            version: module.version.clone(),
            code: module.version_code.clone(),
            author: module.author.clone(),
            state: if module.enabled { "enabled" } else { "disabled" },
            update: if module.has_update_channel { "channel" } else { "-" },
        }
    }
}
