use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qoffea")]
#[command(about = "Inspeksi kualitas biji kopi dengan layanan Qoffea", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tampilkan log detail
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unggah satu gambar biji kopi dan tampilkan hasil analisis
    Analyze {
        /// File gambar (JPG/PNG, maks. 10MB)
        #[arg(required = true)]
        image: PathBuf,

        /// Ambang confidence deteksi (0.0-1.0)
        #[arg(short, long)]
        confidence: Option<f32>,

        /// Unduh laporan PDF setelah analisis
        #[arg(short, long)]
        report: bool,

        /// Lokasi file PDF (default: qoffea_report_{id}.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Timpa file yang sudah ada tanpa bertanya
        #[arg(short, long)]
        force: bool,
    },

    /// Unduh laporan PDF untuk analisis yang sudah ada
    Report {
        /// ID analisis
        #[arg(required = true)]
        analysis_id: String,

        /// Lokasi file PDF
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Timpa file yang sudah ada tanpa bertanya
        #[arg(short, long)]
        force: bool,
    },

    /// Tampilkan/ubah pengaturan
    Config {
        /// Atur URL dasar API
        #[arg(long)]
        set_base_url: Option<String>,

        /// Tampilkan pengaturan
        #[arg(long)]
        show: bool,
    },
}
