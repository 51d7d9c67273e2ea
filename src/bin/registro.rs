//! Terminal front end for recording atenciones against a running server.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Local;
use dotenvy::dotenv;
use strum::IntoEnumIterator;

use atenciones::client::{AtencionesClient, FormState, Session};
use atenciones::export::DEFAULT_FILE_NAME;
use atenciones::model::{Atencion, Campo};

const DEFAULT_URL: &str = "http://127.0.0.1:5000";

const COLUMNS: [&str; 7] = [
    "RUT",
    "Nombre",
    "Comuna",
    "Tipo de Subsidio",
    "Hora Inicio",
    "Hora Fin",
    "Duración (s)",
];

fn print_help() {
    println!("Comandos:");
    println!("  iniciar                 comienza una atención");
    for campo in Campo::iter() {
        let mark = if campo.is_required() { " (obligatorio)" } else { "" };
        println!("  {campo} <valor>{mark}");
    }
    println!("  registrar               guarda la atención en curso");
    println!("  listar                  muestra las atenciones registradas");
    println!("  exportar [archivo]      descarga Excel (por defecto {DEFAULT_FILE_NAME})");
    println!("  salir");
}

fn print_table(atenciones: &[Atencion]) {
    let rows: Vec<[String; 7]> = atenciones
        .iter()
        .map(|a| {
            [
                a.rut.clone(),
                a.nombre.clone(),
                a.comuna.clone(),
                a.tipo_subsidio.clone(),
                a.hora_inicio.clone(),
                a.hora_fin.clone(),
                a.duracion.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(COLUMNS.map(String::from).as_slice()));
    for row in &rows {
        println!("{}", line(row.as_slice()));
    }
    if rows.is_empty() {
        println!("(sin atenciones)");
    }
}

fn prompt(form: &FormState) -> io::Result<()> {
    let label = match form {
        FormState::Idle => "atenciones",
        FormState::InProgress { .. } => "en curso",
    };
    print!("{label}> ");
    io::stdout().flush()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let base_url = env::var("ATENCIONES_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let mut session = Session::new(AtencionesClient::new(base_url));

    let _ = session.refresh().await;
    print_help();

    let stdin = io::stdin();
    prompt(session.form())?;
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, rest) = match line.trim().split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => {}
            "salir" => break,
            "ayuda" => print_help(),
            "iniciar" => match session.start(Local::now().naive_local()) {
                Ok(()) => println!("Atención iniciada"),
                Err(e) => println!("{e}"),
            },
            "registrar" => match session.submit(Local::now().naive_local()).await {
                Ok(id) => {
                    println!("Atención registrada (id {id})");
                    print_table(session.atenciones());
                }
                Err(e) => println!("{e}"),
            },
            "listar" => {
                let _ = session.refresh().await;
                print_table(session.atenciones());
            }
            "exportar" => {
                let path = PathBuf::from(if rest.is_empty() { DEFAULT_FILE_NAME } else { rest });
                match session.export(&path) {
                    Ok(()) => println!("Excel guardado en {}", path.display()),
                    Err(e) => println!("{e}"),
                }
            }
            other => match Campo::from_str(other) {
                Ok(campo) => {
                    if let Err(e) = session.set_field(campo, rest) {
                        println!("{e}");
                    }
                }
                Err(_) => println!("Comando desconocido: {other} (escriba 'ayuda')"),
            },
        }

        prompt(session.form())?;
    }

    Ok(())
}
