use crate::cli::OutputFormat;
use crate::error::Result;
use pocketscan::core::models::site::BindingSite;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Opens the output destination: the given file, or standard output.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            debug!("Writing output to {:?}", path);
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// One flattened CSV record per site.
#[derive(Serialize)]
struct SiteRow<'a> {
    site_id: usize,
    center_x: f64,
    center_y: f64,
    center_z: f64,
    volume: f64,
    druggability_score: f64,
    hydrophobicity: f64,
    cavity_points: usize,
    surface_accessibility: f64,
    residue_count: usize,
    residues: &'a str,
}

/// Formats lining residues as `chain:NAMEnumber`, separated by `;`.
fn residue_labels(site: &BindingSite) -> String {
    site.nearby_residues
        .iter()
        .map(|r| format!("{}:{}{}", r.chain, r.residue_name, r.residue_number))
        .collect::<Vec<_>>()
        .join(";")
}

fn write_csv<W: Write>(sites: &[BindingSite], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for site in sites {
        let residues = residue_labels(site);
        csv_writer.serialize(SiteRow {
            site_id: site.site_id,
            center_x: site.center.x,
            center_y: site.center.y,
            center_z: site.center.z,
            volume: site.volume,
            druggability_score: site.druggability_score,
            hydrophobicity: site.hydrophobicity,
            cavity_points: site.cavity_points,
            surface_accessibility: site.surface_accessibility.value(),
            residue_count: site.residue_count(),
            residues: &residues,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(sites: &[BindingSite], mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "{:>4}  {:>6}  {:>26}  {:>9}  {:>6}  {:>6}  {:>5}  {:>8}",
        "rank", "site", "center", "volume", "score", "hydro", "res", "access"
    )?;
    for (rank, site) in sites.iter().enumerate() {
        let center = format!(
            "({:.2}, {:.2}, {:.2})",
            site.center.x, site.center.y, site.center.z
        );
        writeln!(
            writer,
            "{:>4}  {:>6}  {:>26}  {:>9.2}  {:>6.3}  {:>6.3}  {:>5}  {:>8.1}",
            rank + 1,
            site.site_id,
            center,
            site.volume,
            site.druggability_score,
            site.hydrophobicity,
            site.residue_count(),
            site.surface_accessibility.value()
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_sites<W: Write>(sites: &[BindingSite], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(sites, writer),
        OutputFormat::Csv => write_csv(sites, writer),
        OutputFormat::Table => write_table(sites, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use pocketscan::core::models::residue::NearbyResidue;
    use pocketscan::core::models::site::SurfaceAccessibility;

    fn site() -> BindingSite {
        BindingSite {
            site_id: 4,
            center: Point3::new(1.5, -2.0, 0.25),
            volume: 23.625,
            druggability_score: 0.64,
            hydrophobicity: 0.5,
            nearby_residues: vec![
                NearbyResidue {
                    chain: "A".to_string(),
                    residue_number: 12,
                    residue_name: "LEU".to_string(),
                    distance: 3.1,
                },
                NearbyResidue {
                    chain: "B".to_string(),
                    residue_number: 7,
                    residue_name: "SER".to_string(),
                    distance: 4.4,
                },
            ],
            cavity_points: 7,
            surface_accessibility: SurfaceAccessibility::Accessible,
        }
    }

    fn render(sites: &[BindingSite], format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_sites(sites, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn json_output_is_an_array_of_sites() {
        let text = render(&[site()], OutputFormat::Json);
        let parsed: Vec<BindingSite> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![site()]);
    }

    #[test]
    fn empty_json_output_is_an_empty_array() {
        let text = render(&[], OutputFormat::Json);
        assert_eq!(text.trim(), "[]");
    }

    #[test]
    fn csv_output_flattens_each_site_into_one_row() {
        let text = render(&[site()], OutputFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "site_id,center_x,center_y,center_z,volume,druggability_score,hydrophobicity,\
             cavity_points,surface_accessibility,residue_count,residues"
        );
        assert_eq!(
            lines.next().unwrap(),
            "4,1.5,-2.0,0.25,23.625,0.64,0.5,7,0.6,2,A:LEU12;B:SER7"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn table_output_lists_sites_by_rank() {
        let mut second = site();
        second.site_id = 9;
        second.druggability_score = 0.41;

        let text = render(&[site(), second], OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("score"));
        assert!(lines[1].trim_start().starts_with("1       4"));
        assert!(lines[1].contains("(1.50, -2.00, 0.25)"));
        assert!(lines[1].contains("0.640"));
        assert!(lines[2].trim_start().starts_with("2       9"));
    }
}
