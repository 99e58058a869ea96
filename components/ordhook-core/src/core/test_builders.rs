use bitcoin::absolute::LockTime;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

/// Minimal builder for hand-assembling transactions in unit tests, in the
/// spirit of `ord`'s own `TransactionTemplate` test helper: only the
/// fields the satoshi-tracking and inscription-building algorithms read
/// are settable, everything else defaults to the cheapest valid value.
pub struct TestTransactionBuilder {
    input: Vec<TxIn>,
    output: Vec<TxOut>,
}

impl TestTransactionBuilder {
    pub fn new() -> Self {
        Self {
            input: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn add_input(mut self, witness: Witness) -> Self {
        self.input.push(TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness,
        });
        self
    }

    pub fn add_output(mut self, output: TxOut) -> Self {
        self.output.push(output);
        self
    }

    pub fn build(self) -> Transaction {
        Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: self.input,
            output: self.output,
        }
    }
}

impl Default for TestTransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestTxOutBuilder {
    value: u64,
    script_pubkey: ScriptBuf,
}

impl TestTxOutBuilder {
    pub fn new() -> Self {
        Self {
            value: 0,
            script_pubkey: ScriptBuf::new(),
        }
    }

    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    pub fn script_pubkey(mut self, script_pubkey: ScriptBuf) -> Self {
        self.script_pubkey = script_pubkey;
        self
    }

    pub fn build(self) -> TxOut {
        TxOut {
            value: Amount::from_sat(self.value),
            script_pubkey: self.script_pubkey,
        }
    }
}

impl Default for TestTxOutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
