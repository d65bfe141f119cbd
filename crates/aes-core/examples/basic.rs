//! Encrypts one block with the one-shot API and checks it against a cached cipher.

use aes_core::{decrypt, encrypt, Aes256, Aes256Key};

fn main() {
    let key: [u8; 32] = *b"an example very very secret key!";
    let block: [u8; 16] = *b"first block here";

    let ciphertext = encrypt(&block, &key);
    let cipher = Aes256::new(&Aes256Key::from(key));
    assert_eq!(cipher.encrypt_block(&block), ciphertext);
    assert_eq!(decrypt(&ciphertext, &key), block);

    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("example succeeded; one-shot and cached schedules agree");
}
