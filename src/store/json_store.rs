// src/store/json_store.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Uma coleção serializada em um único arquivo JSON, carregada por inteiro na
/// inicialização e sobrescrita por inteiro a cada mutação — o mesmo contrato
/// do armazenamento local do navegador que este núcleo substitui.
///
/// A gravação é "fire and forget": falha de escrita é registrada no log e a
/// operação em memória segue valendo. JSON corrompido na carga cai para os
/// dados de seed em vez de derrubar a aplicação.
#[derive(Debug, Clone)]
pub struct JsonCollection {
    path: PathBuf,
}

impl JsonCollection {
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        Self {
            path: data_dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Carrega a coleção; arquivo ausente ou ilegível devolve o seed.
    pub fn load_or_seed<T, F>(&self, seed: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        match self.try_load::<Vec<T>>() {
            Some(records) => records,
            None => seed(),
        }
    }

    /// Carrega um valor único (configurações, contador). `None` quando o
    /// arquivo não existe ou está corrompido.
    pub fn try_load<T: DeserializeOwned>(&self) -> Option<T> {
        if !self.path.exists() {
            return None;
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "Falha ao ler coleção; usando seed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "JSON corrompido; usando seed");
                None
            }
        }
    }

    /// Sobrescreve o arquivo com o estado atual. Nunca propaga erro.
    pub fn save<T: Serialize>(&self, value: &T) {
        let raw = match serde_json::to_string_pretty(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(path = %self.path.display(), %err, "Falha ao serializar coleção");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, raw) {
            tracing::error!(path = %self.path.display(), %err, "Falha ao gravar coleção em disco");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Registro {
        nome: String,
    }

    fn registro(nome: &str) -> Registro {
        Registro { nome: nome.into() }
    }

    #[test]
    fn arquivo_ausente_cai_no_seed() {
        let dir = tempfile::tempdir().unwrap();
        let collection = JsonCollection::new(dir.path(), "ausente.json");

        let records = collection.load_or_seed(|| vec![registro("seed")]);
        assert_eq!(records, vec![registro("seed")]);
    }

    #[test]
    fn salva_e_recarrega_a_colecao() {
        let dir = tempfile::tempdir().unwrap();
        let collection = JsonCollection::new(dir.path(), "registros.json");

        collection.save(&vec![registro("a"), registro("b")]);

        let records: Vec<Registro> = collection.load_or_seed(Vec::new);
        assert_eq!(records, vec![registro("a"), registro("b")]);
    }

    #[test]
    fn json_corrompido_cai_no_seed() {
        let dir = tempfile::tempdir().unwrap();
        let collection = JsonCollection::new(dir.path(), "quebrado.json");
        std::fs::write(collection.path(), "{isso nao é json]").unwrap();

        let records = collection.load_or_seed(|| vec![registro("seed")]);
        assert_eq!(records, vec![registro("seed")]);
    }
}
